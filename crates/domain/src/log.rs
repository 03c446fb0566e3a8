//! Log record — the immutable persisted trace of one ingested reading.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, LogId};
use crate::metrics::MetricSet;
use crate::severity::Severity;
use crate::time::Timestamp;

/// Persistence level of a log record, collapsed from [`Severity`].
///
/// `Normal` readings are stored as plain `Info` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Critical,
}

impl LogLevel {
    /// Map an evaluated severity to its storage level.
    #[must_use]
    pub fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::Normal => Self::Info,
            Severity::Warning => Self::Warning,
            Severity::Critical => Self::Critical,
        }
    }

    /// The lowercase wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for [`LogLevel`] identifiers.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct UnknownLogLevel(pub String);

impl std::str::FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            other => Err(UnknownLogLevel(other.to_string())),
        }
    }
}

/// One appended log entry: the metric payload plus its assessed level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: LogId,
    pub device_id: DeviceId,
    pub metrics: MetricSet,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: Timestamp,
}

impl LogRecord {
    /// Create a builder for constructing a [`LogRecord`].
    #[must_use]
    pub fn builder() -> LogRecordBuilder {
        LogRecordBuilder::default()
    }
}

/// Step-by-step builder for [`LogRecord`].
#[derive(Debug, Default)]
pub struct LogRecordBuilder {
    id: Option<LogId>,
    device_id: Option<DeviceId>,
    metrics: MetricSet,
    level: LogLevel,
    message: String,
    timestamp: Option<Timestamp>,
}

impl LogRecordBuilder {
    #[must_use]
    pub fn id(mut self, id: LogId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn metrics(mut self, metrics: MetricSet) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Consume the builder and return a [`LogRecord`].
    ///
    /// # Panics
    ///
    /// Panics if `device_id` was not set; every log entry belongs to a
    /// device.
    #[must_use]
    pub fn build(self) -> LogRecord {
        LogRecord {
            id: self.id.unwrap_or_default(),
            device_id: self.device_id.expect("device_id is required"),
            metrics: self.metrics,
            level: self.level,
            message: self.message,
            timestamp: self.timestamp.unwrap_or_else(crate::time::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_collapse_normal_severity_to_info() {
        assert_eq!(LogLevel::from_severity(Severity::Normal), LogLevel::Info);
        assert_eq!(
            LogLevel::from_severity(Severity::Warning),
            LogLevel::Warning
        );
        assert_eq!(
            LogLevel::from_severity(Severity::Critical),
            LogLevel::Critical
        );
    }

    #[test]
    fn should_roundtrip_level_through_display_and_from_str() {
        for level in [LogLevel::Info, LogLevel::Warning, LogLevel::Critical] {
            let parsed: LogLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn should_return_error_when_parsing_unknown_level() {
        let result: Result<LogLevel, _> = "fatal".parse();
        assert_eq!(result.unwrap_err(), UnknownLogLevel("fatal".to_string()));
    }

    #[test]
    fn should_build_log_record_with_defaults() {
        let record = LogRecord::builder()
            .device_id(DeviceId::new("dev_home_01").unwrap())
            .metrics(MetricSet::new().with("temp", 55.0))
            .level(LogLevel::Critical)
            .message("🔥 FIRE ALERT!")
            .build();
        assert_eq!(record.level, LogLevel::Critical);
        assert_eq!(record.metrics.value("temp"), Some(55.0));
    }

    #[test]
    fn should_generate_unique_ids_for_each_record() {
        let a = LogRecord::builder()
            .device_id(DeviceId::new("d1").unwrap())
            .build();
        let b = LogRecord::builder()
            .device_id(DeviceId::new("d1").unwrap())
            .build();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let record = LogRecord::builder()
            .device_id(DeviceId::new("dev_farm_01").unwrap())
            .metrics(MetricSet::new().with("soil_moisture", 15.0))
            .level(LogLevel::Warning)
            .message("⚠️ Soil needs attention.")
            .build();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: LogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
