//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use sentra_app::ports::{DeviceRepository, EventPublisher, LogStore, VariantConfigSource};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the JSON API and WebSocket stream under `/api`. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem.
pub fn build<DR, LS, P, CS>(state: AppState<DR, LS, P, CS>) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use sentra_app::config_source::StaticVariantConfigs;
    use sentra_app::event_bus::InProcessEventBus;
    use sentra_app::ports::LogQuery;
    use sentra_app::services::device_service::DeviceService;
    use sentra_app::services::ingest_service::{IngestMode, IngestService};
    use sentra_app::services::log_service::LogService;
    use sentra_domain::device::{Device, DeviceStatus};
    use sentra_domain::error::SentraError;
    use sentra_domain::id::DeviceId;
    use sentra_domain::log::{LogLevel, LogRecord};

    struct StubDeviceRepo;
    struct StubLogStore;

    impl DeviceRepository for StubDeviceRepo {
        async fn upsert(&self, device: Device) -> Result<Device, SentraError> {
            Ok(device)
        }
        async fn get_by_id(&self, _id: &DeviceId) -> Result<Option<Device>, SentraError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Device>, SentraError> {
            Ok(vec![])
        }
        async fn count(&self) -> Result<u64, SentraError> {
            Ok(0)
        }
        async fn count_by_status(&self, _status: DeviceStatus) -> Result<u64, SentraError> {
            Ok(0)
        }
    }

    impl LogStore for StubLogStore {
        async fn append(&self, record: LogRecord) -> Result<LogRecord, SentraError> {
            Ok(record)
        }
        async fn recent(&self, _query: LogQuery) -> Result<Vec<LogRecord>, SentraError> {
            Ok(vec![])
        }
        async fn count(&self) -> Result<u64, SentraError> {
            Ok(0)
        }
        async fn count_by_level(&self, _level: LogLevel) -> Result<u64, SentraError> {
            Ok(0)
        }
    }

    fn test_state() -> AppState<StubDeviceRepo, StubLogStore, Arc<InProcessEventBus>, StaticVariantConfigs>
    {
        let event_bus = Arc::new(InProcessEventBus::new(16));
        AppState::new(
            IngestService::new(
                StubDeviceRepo,
                StubLogStore,
                Arc::clone(&event_bus),
                IngestMode::ServerComputed,
            ),
            DeviceService::new(StubDeviceRepo),
            LogService::new(StubLogStore, StubDeviceRepo),
            StaticVariantConfigs,
            event_bus,
        )
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_variant_config() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/config/variants/office")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_serve_variant_summaries() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/config/variants")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
