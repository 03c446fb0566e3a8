//! Server-side live view — follows one variant's event stream and reports
//! status transitions and alerts through tracing.
//!
//! This is the in-process consumer of the fan-out: it drives a
//! [`Dashboard`] exactly the way a remote client would, which keeps the
//! state machine exercised even without any connected subscriber.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use sentra_domain::event::IngestEvent;
use sentra_domain::severity::Severity;
use sentra_domain::variant::Variant;

use crate::dashboard::Dashboard;
use crate::ports::VariantConfigSource;

/// Upper bound on the one-off configuration fetch; expiry counts as a
/// fetch failure and the view never goes live.
pub const CONFIG_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Follow `variant` on an event bus subscription until the bus is closed.
///
/// The receiver should be subscribed before spawning so delivery is
/// continuous from the first event after the live transition. A failed or
/// timed-out configuration fetch is logged and ends the task; there is no
/// automatic retry.
pub async fn follow<C>(mut rx: broadcast::Receiver<IngestEvent>, configs: C, variant: Variant)
where
    C: VariantConfigSource,
{
    let mut dashboard = Dashboard::new();
    dashboard.select_variant(variant);

    match tokio::time::timeout(CONFIG_FETCH_TIMEOUT, configs.fetch(variant)).await {
        Ok(Ok(config)) => {
            dashboard.apply_config(config);
        }
        Ok(Err(err)) => {
            tracing::error!(%variant, error = %err, "live view config fetch failed");
            return;
        }
        Err(_) => {
            tracing::error!(%variant, "live view config fetch timed out");
            return;
        }
    }
    tracing::info!(%variant, "live view following variant");

    let mut last_status = Severity::Normal;
    loop {
        match rx.recv().await {
            Ok(event) => {
                if !dashboard.handle_event(&event) {
                    continue;
                }
                if let Some(live) = dashboard.live() {
                    if live.status != last_status {
                        tracing::info!(
                            %variant,
                            from = %last_status,
                            to = %live.status,
                            "status changed"
                        );
                        last_status = live.status;
                    }
                }
                if event.status.is_alert() {
                    tracing::warn!(
                        %variant,
                        device = %event.device_id,
                        status = %event.status,
                        message = %event.message,
                        "alert"
                    );
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "live view lagged, events dropped");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
