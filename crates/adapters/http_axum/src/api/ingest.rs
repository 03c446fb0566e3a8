//! The ingestion entry point — the sole write path into the system.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use sentra_app::ports::{DeviceRepository, EventPublisher, LogStore, VariantConfigSource};
use sentra_app::services::ingest_service::IngestRequest;
use sentra_domain::error::NotFoundError;
use sentra_domain::id::{DeviceId, LogId};
use sentra_domain::metrics::MetricSet;
use sentra_domain::severity::Severity;
use sentra_domain::variant::Variant;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/ingest`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestBody {
    pub device_id: String,
    pub domain: String,
    pub metrics: MetricSet,
    #[serde(default)]
    pub status: Option<Severity>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for a successful ingestion.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub success: bool,
    pub log_id: LogId,
}

/// `POST /api/ingest`
pub async fn ingest<DR, LS, P, CS>(
    State(state): State<AppState<DR, LS, P, CS>>,
    Json(body): Json<IngestBody>,
) -> Result<Json<IngestResponse>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    let device_id = DeviceId::new(body.device_id).map_err(sentra_domain::error::SentraError::from)?;
    let variant = Variant::from_str(&body.domain).map_err(|err| {
        ApiError::from(sentra_domain::error::SentraError::from(NotFoundError {
            entity: "Variant",
            id: err.0,
        }))
    })?;

    let receipt = state
        .ingest_service
        .ingest(IngestRequest {
            device_id,
            variant,
            metrics: body.metrics,
            status: body.status,
            message: body.message,
        })
        .await?;

    Ok(Json(IngestResponse {
        success: true,
        log_id: receipt.log_id,
    }))
}
