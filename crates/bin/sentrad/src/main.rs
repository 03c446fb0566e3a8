//! # sentrad — sentra daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Spawn the simulator and live-view background tasks when enabled
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use sentra_adapter_http_axum::router;
use sentra_adapter_http_axum::state::AppState;
use sentra_adapter_simulator::SimulatorSettings;
use sentra_adapter_storage_sqlite_sqlx::{Config as DbConfig, SqliteDeviceRepository, SqliteLogStore};
use sentra_app::config_source::StaticVariantConfigs;
use sentra_app::event_bus::InProcessEventBus;
use sentra_app::live;
use sentra_app::services::device_service::DeviceService;
use sentra_app::services::ingest_service::IngestService;
use sentra_app::services::log_service::LogService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Services (each gets its own repository handle over the shared pool)
    let ingest_service = Arc::new(IngestService::new(
        SqliteDeviceRepository::new(pool.clone()),
        SqliteLogStore::new(pool.clone()),
        Arc::clone(&event_bus),
        config.ingest.mode,
    ));
    let device_service = Arc::new(DeviceService::new(SqliteDeviceRepository::new(pool.clone())));
    let log_service = Arc::new(LogService::new(
        SqliteLogStore::new(pool.clone()),
        SqliteDeviceRepository::new(pool),
    ));

    // Background tasks
    if config.simulator.enabled {
        let settings = SimulatorSettings {
            interval: Duration::from_millis(config.simulator.interval_ms),
            self_evaluate: config.simulator.self_evaluate,
            variants: config.simulator.variants.clone(),
        };
        tokio::spawn(sentra_adapter_simulator::run(
            Arc::clone(&ingest_service),
            settings,
        ));
    }
    if config.live_view.enabled {
        tokio::spawn(live::follow(
            event_bus.subscribe(),
            StaticVariantConfigs,
            config.live_view.variant,
        ));
    }

    // HTTP
    let state = AppState::from_arcs(
        ingest_service,
        device_service,
        log_service,
        Arc::new(StaticVariantConfigs),
        Arc::clone(&event_bus),
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "sentrad listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
