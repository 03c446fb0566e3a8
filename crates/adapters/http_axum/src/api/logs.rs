//! JSON REST handlers for the ingestion log and its stats projection.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use sentra_app::ports::{
    DeviceRepository, EventPublisher, LogQuery, LogStore, VariantConfigSource,
};
use sentra_app::services::log_service::LogStats;
use sentra_domain::error::{NotFoundError, SentraError};
use sentra_domain::id::DeviceId;
use sentra_domain::log::{LogLevel, LogRecord};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /api/logs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub device_id: Option<String>,
    pub level: Option<String>,
    pub limit: Option<usize>,
}

/// `GET /api/logs?deviceId=&level=&limit=`
pub async fn list<DR, LS, P, CS>(
    State(state): State<AppState<DR, LS, P, CS>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<LogRecord>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    let device_id = params
        .device_id
        .map(|id| DeviceId::from_str(&id))
        .transpose()
        .map_err(SentraError::from)?;
    let level = params
        .level
        .map(|level| {
            LogLevel::from_str(&level).map_err(|err| {
                SentraError::from(NotFoundError {
                    entity: "LogLevel",
                    id: err.0,
                })
            })
        })
        .transpose()?;

    let records = state
        .log_service
        .recent(LogQuery {
            device_id,
            level,
            limit: params.limit,
        })
        .await?;
    Ok(Json(records))
}

/// `GET /api/logs/stats`
pub async fn stats<DR, LS, P, CS>(
    State(state): State<AppState<DR, LS, P, CS>>,
) -> Result<Json<LogStats>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    let stats = state.log_service.stats().await?;
    Ok(Json(stats))
}
