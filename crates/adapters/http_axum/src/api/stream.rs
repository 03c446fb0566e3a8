//! WebSocket fan-out stream for real-time updates.
//!
//! The server pushes every broadcast event to every connected client as a
//! `device_update` frame. Clients may send `join_variant` / `leave_variant`
//! commands; rooms are advisory — membership is tracked per connection and
//! logged, but delivery stays global.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;

use sentra_app::event_bus::InProcessEventBus;
use sentra_app::ports::{DeviceRepository, EventPublisher, LogStore, VariantConfigSource};
use sentra_domain::event::{DEVICE_UPDATE, IngestEvent};
use sentra_domain::variant::Variant;

use crate::state::AppState;

/// Outbound frame wrapping a broadcast event.
#[derive(Serialize)]
struct ServerFrame<'a> {
    event: &'static str,
    data: &'a IngestEvent,
}

/// Inbound room commands.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
enum ClientCommand {
    JoinVariant(String),
    LeaveVariant(String),
}

/// `GET /api/stream` — upgrade to the WebSocket event stream.
pub async fn stream<DR, LS, P, CS>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<DR, LS, P, CS>>,
) -> impl IntoResponse
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    CS: VariantConfigSource + Send + Sync + 'static,
{
    let bus = Arc::clone(&state.event_bus);
    ws.on_upgrade(move |socket| handle_socket(socket, bus))
}

/// Manage a single WebSocket connection after upgrade.
///
/// The sender task forwards bus events in publish order; the receiver loop
/// handles room commands until the client disconnects.
async fn handle_socket(socket: WebSocket, bus: Arc<InProcessEventBus>) {
    let conn_id = uuid::Uuid::new_v4();
    tracing::info!(%conn_id, "stream client connected");

    let mut rx = bus.subscribe();
    let (mut sink, mut inbound) = socket.split();

    let send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let frame = ServerFrame {
                        event: DEVICE_UPDATE,
                        data: &event,
                    };
                    match serde_json::to_string(&frame) {
                        Ok(json) => {
                            if sink.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to serialize event frame");
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "stream subscriber lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut rooms: HashSet<Variant> = HashSet::new();
    while let Some(result) = inbound.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientCommand>(&text) {
                Ok(ClientCommand::JoinVariant(raw)) => match raw.parse::<Variant>() {
                    Ok(variant) => {
                        rooms.insert(variant);
                        tracing::info!(%conn_id, %variant, "client joined variant room");
                    }
                    Err(err) => tracing::debug!(%conn_id, error = %err, "join rejected"),
                },
                Ok(ClientCommand::LeaveVariant(raw)) => match raw.parse::<Variant>() {
                    Ok(variant) => {
                        rooms.remove(&variant);
                        tracing::info!(%conn_id, %variant, "client left variant room");
                    }
                    Err(err) => tracing::debug!(%conn_id, error = %err, "leave rejected"),
                },
                Err(err) => {
                    tracing::debug!(%conn_id, error = %err, "unrecognized client frame");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(%conn_id, error = %err, "stream receive error");
                break;
            }
        }
    }

    send_task.abort();
    tracing::info!(%conn_id, "stream client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentra_domain::id::DeviceId;
    use sentra_domain::metrics::MetricSet;
    use sentra_domain::severity::Severity;

    #[test]
    fn should_parse_join_variant_command() {
        let cmd: ClientCommand =
            serde_json::from_str(r#"{"event":"join_variant","data":"home"}"#).unwrap();
        assert!(matches!(cmd, ClientCommand::JoinVariant(ref v) if v == "home"));
    }

    #[test]
    fn should_parse_leave_variant_command() {
        let cmd: ClientCommand =
            serde_json::from_str(r#"{"event":"leave_variant","data":"farm"}"#).unwrap();
        assert!(matches!(cmd, ClientCommand::LeaveVariant(ref v) if v == "farm"));
    }

    #[test]
    fn should_reject_unknown_command() {
        let result: Result<ClientCommand, _> =
            serde_json::from_str(r#"{"event":"subscribe_all","data":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_device_update_frame() {
        let event = IngestEvent::builder()
            .device_id(DeviceId::new("dev_home_01").unwrap())
            .variant(Variant::Home)
            .metrics(MetricSet::new().with("temp", 55.0))
            .status(Severity::Critical)
            .message("🔥 FIRE ALERT!")
            .build();
        let frame = ServerFrame {
            event: DEVICE_UPDATE,
            data: &event,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["event"], "device_update");
        assert_eq!(json["data"]["domain"], "home");
        assert_eq!(json["data"]["deviceId"], "dev_home_01");
    }
}
