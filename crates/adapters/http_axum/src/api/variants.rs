//! JSON REST handlers for variant configuration lookup.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};

use sentra_app::ports::{DeviceRepository, EventPublisher, LogStore, VariantConfigSource};
use sentra_domain::error::{NotFoundError, SentraError};
use sentra_domain::variant::Variant;
use sentra_domain::variant_config::{self, VariantConfig, VariantSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/config/variants` — display metadata for every variant.
pub async fn list<DR, LS, P, CS>(
    State(_state): State<AppState<DR, LS, P, CS>>,
) -> Json<Vec<VariantSummary>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    let summaries = variant_config::all()
        .iter()
        .map(VariantConfig::summary)
        .collect();
    Json(summaries)
}

/// `GET /api/config/variants/{id}` — full configuration for one variant.
pub async fn get<DR, LS, P, CS>(
    State(state): State<AppState<DR, LS, P, CS>>,
    Path(id): Path<String>,
) -> Result<Json<VariantConfig>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    let variant = Variant::from_str(&id).map_err(|err| {
        SentraError::from(NotFoundError {
            entity: "Variant",
            id: err.0,
        })
    })?;
    let config = state.config_source.fetch(variant).await?;
    Ok(Json(config))
}
