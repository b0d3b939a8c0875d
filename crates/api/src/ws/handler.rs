use std::sync::Arc;

use aicreate_core::types::SessionId;
use aicreate_events::{event_types, NotificationMessage};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::state::AppState;
use crate::ws::manager::{WsManager, WsRegistration};

/// Query parameters accepted by the WebSocket endpoint.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// Session id to resume; a fresh one is assigned when absent.
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the session is registered with `WsManager` and served
/// by two tasks (sender + receiver).
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let session_id = params
        .client_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    ws.on_upgrade(move |socket| handle_socket(socket, session_id, state))
}

/// Build the status message a client receives right after connecting.
pub fn status_message(session_id: &str, queue_remaining: usize) -> NotificationMessage {
    NotificationMessage::new(event_types::STATUS).with_payload(serde_json::json!({
        "status": { "exec_info": { "queue_remaining": queue_remaining } },
        "sid": session_id,
    }))
}

/// Manage a single WebSocket session after upgrade.
///
/// 1. Registers the session with `WsManager`.
/// 2. Writes the initial status message directly to the sink, so it always
///    precedes anything the drain loop queued in the meantime.
/// 3. Spawns a sender task that forwards messages from the manager channel.
/// 4. Processes inbound messages on the current task.
/// 5. Unregisters on disconnect.
async fn handle_socket(socket: WebSocket, session_id: SessionId, state: AppState) {
    let ws_manager: Arc<WsManager> = Arc::clone(&state.ws_manager);
    tracing::info!(session_id = %session_id, "WebSocket connected");

    let WsRegistration {
        generation,
        receiver: mut rx,
    } = ws_manager.add(session_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    match status_message(&session_id, state.queue_remaining()).to_json() {
        Ok(text) => {
            if sink.send(Message::Text(text.into())).await.is_err() {
                tracing::debug!(session_id = %session_id, "WebSocket closed before status was sent");
            }
        }
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Failed to encode status message");
        }
    }

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_session_id = session_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(session_id = %sender_session_id, "WebSocket sink closed");
                return;
            }
        }
        // Channel ended: the session was replaced or the server shut down.
        let _ = sink.close().await;
    });

    // Receiver loop: the client sends nothing we act on yet.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(session_id = %session_id, "Pong received");
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(session_id = %session_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove_if_current(&session_id, generation).await;
    send_task.abort();
    tracing::info!(session_id = %session_id, "WebSocket disconnected");
}
