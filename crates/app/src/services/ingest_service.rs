//! Ingest service — the sole write path for device readings.
//!
//! One accepted reading produces three effects, in order: the device record
//! is created or refreshed, an immutable log record is appended, and the
//! resulting event is broadcast. Broadcast is fire-and-forget: a publish
//! failure never fails the ingestion itself.

use sentra_domain::device::Device;
use sentra_domain::error::{SentraError, ValidationError};
use sentra_domain::event::IngestEvent;
use sentra_domain::id::{DeviceId, LogId};
use sentra_domain::log::{LogLevel, LogRecord};
use sentra_domain::metrics::MetricSet;
use sentra_domain::severity::{self, Assessment, Severity};
use sentra_domain::variant::Variant;

use crate::ports::{DeviceRepository, EventPublisher, LogStore};

/// Where the severity of a reading is decided.
///
/// One mode is picked per deployment; the two are never mixed by guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestMode {
    /// Evaluate severity from raw metrics at the ingestion boundary,
    /// ignoring whatever the caller claims.
    #[default]
    ServerComputed,
    /// Trust the caller-supplied status and message without re-validation —
    /// a deliberate trust boundary for pipelines that evaluate upstream.
    /// Readings that arrive without a status are still evaluated here.
    TrustClient,
}

/// One inbound reading, as accepted by the ingestion entry point.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub device_id: DeviceId,
    pub variant: Variant,
    pub metrics: MetricSet,
    pub status: Option<Severity>,
    pub message: Option<String>,
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone)]
pub struct IngestReceipt {
    pub log_id: LogId,
    pub event: IngestEvent,
}

/// Application service implementing the ingestion pipeline.
pub struct IngestService<DR, LS, P> {
    devices: DR,
    logs: LS,
    publisher: P,
    mode: IngestMode,
}

impl<DR, LS, P> IngestService<DR, LS, P>
where
    DR: DeviceRepository,
    LS: LogStore,
    P: EventPublisher,
{
    /// Create a new service with the given collaborators and mode.
    pub fn new(devices: DR, logs: LS, publisher: P, mode: IngestMode) -> Self {
        Self {
            devices,
            logs,
            publisher,
            mode,
        }
    }

    /// Ingest one reading.
    ///
    /// # Errors
    ///
    /// Returns [`SentraError::Validation`] when the reading carries no
    /// metrics, or a storage error from the device upsert or log append.
    /// Publish failures are swallowed; broadcast is best-effort.
    #[tracing::instrument(skip(self, request), fields(device_id = %request.device_id, variant = %request.variant))]
    pub async fn ingest(&self, request: IngestRequest) -> Result<IngestReceipt, SentraError> {
        if request.metrics.is_empty() {
            return Err(ValidationError::EmptyMetrics.into());
        }

        let Assessment { status, message } = self.assess(&request);

        let device = Device::registered(request.device_id.clone(), request.variant);
        self.devices.upsert(device).await?;

        let record = LogRecord::builder()
            .device_id(request.device_id.clone())
            .metrics(request.metrics.clone())
            .level(LogLevel::from_severity(status))
            .message(message.clone())
            .build();
        let stored = self.logs.append(record).await?;

        let event = IngestEvent::builder()
            .device_id(request.device_id)
            .variant(request.variant)
            .metrics(request.metrics)
            .status(status)
            .message(message)
            .timestamp(stored.timestamp)
            .build();

        if let Err(err) = self.publisher.publish(event.clone()).await {
            tracing::debug!(error = %err, "event publish failed; broadcast is best-effort");
        }

        Ok(IngestReceipt {
            log_id: stored.id,
            event,
        })
    }

    fn assess(&self, request: &IngestRequest) -> Assessment {
        match self.mode {
            IngestMode::ServerComputed => severity::evaluate(request.variant, &request.metrics),
            IngestMode::TrustClient => match request.status {
                Some(status) => Assessment {
                    status,
                    message: request.message.clone().unwrap_or_default(),
                },
                None => severity::evaluate(request.variant, &request.metrics),
            },
        }
    }
}
