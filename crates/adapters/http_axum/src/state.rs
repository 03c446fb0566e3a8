//! Shared application state for axum handlers.

use std::sync::Arc;

use sentra_app::event_bus::InProcessEventBus;
use sentra_app::ports::{DeviceRepository, EventPublisher, LogStore, VariantConfigSource};
use sentra_app::services::device_service::DeviceService;
use sentra_app::services::ingest_service::IngestService;
use sentra_app::services::log_service::LogService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types, event publisher, and config source to
/// avoid dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone` — only the `Arc` wrappers are
/// cloned.
pub struct AppState<DR, LS, P, CS> {
    /// The sole write path for readings.
    pub ingest_service: Arc<IngestService<DR, LS, P>>,
    /// Device query service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Log query / stats service.
    pub log_service: Arc<LogService<LS, DR>>,
    /// Per-variant configuration lookup.
    pub config_source: Arc<CS>,
    /// Event bus the WebSocket stream subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<DR, LS, P, CS> Clone for AppState<DR, LS, P, CS> {
    fn clone(&self) -> Self {
        Self {
            ingest_service: Arc::clone(&self.ingest_service),
            device_service: Arc::clone(&self.device_service),
            log_service: Arc::clone(&self.log_service),
            config_source: Arc::clone(&self.config_source),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<DR, LS, P, CS> AppState<DR, LS, P, CS>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        ingest_service: IngestService<DR, LS, P>,
        device_service: DeviceService<DR>,
        log_service: LogService<LS, DR>,
        config_source: CS,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            ingest_service: Arc::new(ingest_service),
            device_service: Arc::new(device_service),
            log_service: Arc::new(log_service),
            config_source: Arc::new(config_source),
            event_bus,
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when services need to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(
        ingest_service: Arc<IngestService<DR, LS, P>>,
        device_service: Arc<DeviceService<DR>>,
        log_service: Arc<LogService<LS, DR>>,
        config_source: Arc<CS>,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            ingest_service,
            device_service,
            log_service,
            config_source,
            event_bus,
        }
    }
}
