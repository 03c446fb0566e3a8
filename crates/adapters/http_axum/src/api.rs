//! JSON REST and WebSocket handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod ingest;
#[allow(clippy::missing_errors_doc)]
pub mod logs;
pub mod stream;
#[allow(clippy::missing_errors_doc)]
pub mod variants;

use axum::Router;
use axum::routing::{get, post};

use sentra_app::ports::{DeviceRepository, EventPublisher, LogStore, VariantConfigSource};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, LS, P, CS>() -> Router<AppState<DR, LS, P, CS>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    Router::new()
        // Ingestion
        .route("/ingest", post(ingest::ingest::<DR, LS, P, CS>))
        // Devices
        .route("/devices", get(devices::list::<DR, LS, P, CS>))
        .route("/devices/{id}", get(devices::get::<DR, LS, P, CS>))
        // Logs
        .route("/logs", get(logs::list::<DR, LS, P, CS>))
        .route("/logs/stats", get(logs::stats::<DR, LS, P, CS>))
        // Variant configuration
        .route("/config/variants", get(variants::list::<DR, LS, P, CS>))
        .route("/config/variants/{id}", get(variants::get::<DR, LS, P, CS>))
        // Real-time fan-out
        .route("/stream", get(stream::stream::<DR, LS, P, CS>))
}
