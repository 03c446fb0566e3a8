//! Log service — log queries and the aggregate stats projection.

use serde::Serialize;

use sentra_domain::device::DeviceStatus;
use sentra_domain::error::SentraError;
use sentra_domain::log::{LogLevel, LogRecord};

use crate::ports::{DeviceRepository, LogQuery, LogStore};

/// Aggregate counts over persisted logs and devices.
///
/// A pure read projection; nothing here feeds back into ingestion or
/// fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
    pub total_logs: u64,
    pub critical_alerts: u64,
    pub warnings: u64,
    pub total_devices: u64,
    pub online_devices: u64,
}

/// Application service for log queries.
pub struct LogService<LS, DR> {
    logs: LS,
    devices: DR,
}

impl<LS, DR> LogService<LS, DR>
where
    LS: LogStore,
    DR: DeviceRepository,
{
    /// Create a new service backed by the given stores.
    pub fn new(logs: LS, devices: DR) -> Self {
        Self { logs, devices }
    }

    /// Fetch matching log records, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the log store.
    pub async fn recent(&self, query: LogQuery) -> Result<Vec<LogRecord>, SentraError> {
        self.logs.recent(query).await
    }

    /// Compute the aggregate stats projection.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from either store.
    #[tracing::instrument(skip(self))]
    pub async fn stats(&self) -> Result<LogStats, SentraError> {
        Ok(LogStats {
            total_logs: self.logs.count().await?,
            critical_alerts: self.logs.count_by_level(LogLevel::Critical).await?,
            warnings: self.logs.count_by_level(LogLevel::Warning).await?,
            total_devices: self.devices.count().await?,
            online_devices: self.devices.count_by_status(DeviceStatus::Online).await?,
        })
    }
}
