//! Real-time channel.
//!
//! `GET /api/security/ws` upgrades authenticated clients to a WebSocket.
//! Every frame in both directions is a JSON `{"event", "data"}` envelope.
//! On connect the server replays the full registry snapshot
//! (`cameras:init`, `alerts:init`, `intrusions:init`, `risk:update`), then
//! forwards live registry events. The only client-initiated event is
//! `rtsp:request {cameraId}`, answered with a `camera:stream` descriptor.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::application::security::SecurityService;
use crate::infrastructure::events::BroadcastPublisher;
use crate::presentation::auth::SessionUser;
use crate::presentation::models::{
    AlertDto, CameraDto, IntrusionDto, StreamDescriptorDto, WsFrame,
};

/// Shared state for the WebSocket route
#[derive(Clone)]
pub struct WsState {
    pub service: Arc<SecurityService>,
    pub events: Arc<BroadcastPublisher>,
}

/// Upgrade handler. The [`SessionUser`] extractor rejects unauthenticated
/// upgrades with the same 401 bodies as the REST routes.
pub async fn ws_upgrade(
    user: SessionUser,
    ws: WebSocketUpgrade,
    State(state): State<WsState>,
) -> Response {
    debug!(user = %user.username, "websocket upgrade accepted");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: WsState) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut rx = state.events.subscribe();

    // Snapshot replay before any live events
    let snapshot = state.service.snapshot();
    let init_frames = [
        WsFrame::new(
            "cameras:init",
            snapshot.cameras.iter().map(CameraDto::from).collect::<Vec<_>>(),
        ),
        WsFrame::new(
            "alerts:init",
            snapshot.alerts.iter().map(AlertDto::from).collect::<Vec<_>>(),
        ),
        WsFrame::new(
            "intrusions:init",
            snapshot.intrusions.iter().map(IntrusionDto::from).collect::<Vec<_>>(),
        ),
        WsFrame::new("risk:update", snapshot.overall_risk),
    ];
    for frame in init_frames {
        match frame.and_then(|f| serde_json::to_string(&f)) {
            Ok(text) => {
                if ws_tx.send(Message::Text(text.into())).await.is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to encode snapshot frame");
                return;
            }
        }
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        let Ok(frame) = WsFrame::from_event(&event) else { continue };
                        let Ok(text) = serde_json::to_string(&frame) else { continue };
                        if ws_tx.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Client catches up from subsequent events; the next
                        // risk:update restores a consistent view
                        warn!("websocket client lagged, missed {} events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_client_frame(&state, &text) {
                            match serde_json::to_string(&reply) {
                                Ok(text) => {
                                    if ws_tx.send(Message::Text(text.into())).await.is_err() {
                                        break;
                                    }
                                }
                                Err(e) => warn!(error = %e, "failed to encode reply frame"),
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_tx.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    debug!("websocket client disconnected");
}

/// Dispatch one client frame. Unknown events and malformed frames are
/// silently ignored.
fn handle_client_frame(state: &WsState, text: &str) -> Option<WsFrame> {
    let frame: WsFrame = serde_json::from_str(text).ok()?;
    match frame.event.as_str() {
        "rtsp:request" => {
            let camera_id = frame.data.get("cameraId")?.as_str()?.to_string();
            let descriptor = state.service.camera_stream(&camera_id)?;
            WsFrame::new("camera:stream", StreamDescriptorDto::from(&descriptor)).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::entropy::StdEntropy;
    use crate::infrastructure::events::EventPublisher;

    fn test_state() -> WsState {
        let events = Arc::new(BroadcastPublisher::new(16));
        let service = Arc::new(SecurityService::new(
            events.clone() as Arc<dyn EventPublisher>,
            Arc::new(StdEntropy::seeded(7)),
        ));
        WsState { service, events }
    }

    #[test]
    fn rtsp_request_answers_with_stream_descriptor() {
        let state = test_state();
        let reply = handle_client_frame(
            &state,
            r#"{"event":"rtsp:request","data":{"cameraId":"cam-entrance"}}"#,
        )
        .expect("known camera yields a reply");

        assert_eq!(reply.event, "camera:stream");
        assert_eq!(reply.data["cameraId"], "cam-entrance");
        assert!(reply.data["rtspUrl"].as_str().unwrap().starts_with("rtsp://"));
    }

    #[test]
    fn rtsp_request_for_unknown_camera_is_ignored() {
        let state = test_state();
        let reply = handle_client_frame(
            &state,
            r#"{"event":"rtsp:request","data":{"cameraId":"cam-ghost"}}"#,
        );
        assert!(reply.is_none());
    }

    #[test]
    fn malformed_frames_are_ignored() {
        let state = test_state();
        assert!(handle_client_frame(&state, "not json").is_none());
        assert!(handle_client_frame(&state, r#"{"event":"rtsp:request","data":{}}"#).is_none());
        assert!(handle_client_frame(&state, r#"{"event":"unknown","data":null}"#).is_none());
    }
}
