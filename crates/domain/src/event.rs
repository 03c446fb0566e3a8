//! Ingest event — the immutable unit of real-time fan-out.
//!
//! An event is created once per accepted reading, delivered at most once to
//! each live subscriber, and then discarded; nothing in the core retains it
//! beyond the derived dashboard state.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::metrics::MetricSet;
use crate::severity::Severity;
use crate::time::Timestamp;
use crate::variant::Variant;

/// Wire name under which ingest events are broadcast.
pub const DEVICE_UPDATE: &str = "device_update";

/// A single ingested reading, ready for fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestEvent {
    pub device_id: DeviceId,
    #[serde(rename = "domain")]
    pub variant: Variant,
    pub metrics: MetricSet,
    pub status: Severity,
    pub message: String,
    pub timestamp: Timestamp,
}

impl IngestEvent {
    /// Create a builder for constructing an [`IngestEvent`].
    #[must_use]
    pub fn builder() -> IngestEventBuilder {
        IngestEventBuilder::default()
    }
}

/// Step-by-step builder for [`IngestEvent`].
#[derive(Debug, Default)]
pub struct IngestEventBuilder {
    device_id: Option<DeviceId>,
    variant: Option<Variant>,
    metrics: MetricSet,
    status: Severity,
    message: String,
    timestamp: Option<Timestamp>,
}

impl IngestEventBuilder {
    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn metrics(mut self, metrics: MetricSet) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn status(mut self, status: Severity) -> Self {
        self.status = status;
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

    /// Consume the builder and return an [`IngestEvent`].
    ///
    /// # Panics
    ///
    /// Panics if `device_id` or `variant` were not set; both are required
    /// at every construction site.
    #[must_use]
    pub fn build(self) -> IngestEvent {
        IngestEvent {
            device_id: self.device_id.expect("device_id is required"),
            variant: self.variant.expect("variant is required"),
            metrics: self.metrics,
            status: self.status,
            message: self.message,
            timestamp: self.timestamp.unwrap_or_else(crate::time::now),
        }
    }
}
