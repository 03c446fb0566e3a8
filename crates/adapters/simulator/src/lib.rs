//! # sentra-adapter-simulator
//!
//! Demo integration that stands in for real devices: on every tick it
//! generates one randomized reading per enabled variant and pushes it
//! through the ingestion pipeline.
//!
//! ## Provided devices
//!
//! | Variant | Device id | Channels |
//! |---------|-------------|----------|
//! | home | `dev_home_01` | temp, smoke, door, motion |
//! | hospital | `dev_hosp_01` | heart_rate, spo2, blood_pressure |
//! | factory | `dev_fact_01` | machine_temp, vibration, pressure |
//! | traffic | `dev_traf_01` | vehicle_density, accident, congestion |
//! | farm | `dev_farm_01` | soil_moisture, light_intensity, ph |
//!
//! ## Dependency rule
//!
//! Depends on `sentra-app` (ingest service and port traits) and
//! `sentra-domain` only.

mod generators;

pub use generators::generate;

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use sentra_app::ports::{DeviceRepository, EventPublisher, LogStore};
use sentra_app::services::ingest_service::{IngestRequest, IngestService};
use sentra_domain::id::DeviceId;
use sentra_domain::severity;
use sentra_domain::variant::Variant;

/// Simulator settings, one instance per process.
#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    /// Delay between ticks.
    pub interval: Duration,
    /// Variants to emit readings for.
    pub variants: Vec<Variant>,
    /// When set, the simulator evaluates severity itself and sends the
    /// result along with the metrics, exercising the trusted-status path.
    /// Otherwise readings go out raw and the server decides.
    pub self_evaluate: bool,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            variants: Variant::ALL.to_vec(),
            self_evaluate: false,
        }
    }
}

/// The fixed device id a simulated variant reports.
#[must_use]
pub fn device_id(variant: Variant) -> DeviceId {
    let raw = match variant {
        Variant::Home => "dev_home_01",
        Variant::Hospital => "dev_hosp_01",
        Variant::Factory => "dev_fact_01",
        Variant::Traffic => "dev_traf_01",
        Variant::Farm => "dev_farm_01",
    };
    DeviceId::new(raw).expect("fixed simulator ids are non-empty")
}

/// Build the ingest request for one tick of one variant.
fn tick_request(variant: Variant, rng: &mut StdRng, self_evaluate: bool) -> IngestRequest {
    let metrics = generators::generate(variant, rng);
    let (status, message) = if self_evaluate {
        let assessment = severity::evaluate(variant, &metrics);
        (Some(assessment.status), Some(assessment.message))
    } else {
        (None, None)
    };
    IngestRequest {
        device_id: device_id(variant),
        variant,
        metrics,
        status,
        message,
    }
}

/// Run the simulator until the task is aborted.
///
/// A failed ingestion for one variant is logged and does not stop the loop
/// or affect the other variants.
pub async fn run<DR, LS, P>(
    ingest: Arc<IngestService<DR, LS, P>>,
    settings: SimulatorSettings,
) where
    DR: DeviceRepository + Send + Sync,
    LS: LogStore + Send + Sync,
    P: EventPublisher + Send + Sync,
{
    tracing::info!(
        interval_ms = settings.interval.as_millis(),
        variants = settings.variants.len(),
        self_evaluate = settings.self_evaluate,
        "simulator started"
    );

    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(settings.interval);
    loop {
        ticker.tick().await;
        for &variant in &settings.variants {
            let request = tick_request(variant, &mut rng, settings.self_evaluate);
            match ingest.ingest(request).await {
                Ok(receipt) => {
                    tracing::debug!(
                        %variant,
                        status = %receipt.event.status,
                        "simulated reading ingested"
                    );
                }
                Err(err) => {
                    tracing::warn!(%variant, error = %err, "simulated reading rejected");
                }
            }
        }
    }
}
