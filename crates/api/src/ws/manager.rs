use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use aicreate_core::types::{SessionId, Timestamp};
use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single live session.
pub struct WsConnection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
    /// Distinguishes this registration from earlier ones under the same id.
    generation: u64,
}

/// Returned by [`WsManager::add`] to the connection that registered.
pub struct WsRegistration {
    /// Pass back to [`WsManager::remove_if_current`] on disconnect.
    pub generation: u64,
    /// Outbound messages to forward to the WebSocket sink.
    pub receiver: mpsc::UnboundedReceiver<Message>,
}

/// Outcome of a send or broadcast, counted per session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Sessions the message was handed to.
    pub delivered: usize,
    /// Sessions whose channel was already closed.
    pub failed: usize,
}

/// Manages all live sessions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Sends happen under the read lock, so a
/// connect or disconnect waits for an in-progress broadcast to finish
/// instead of mutating the map underneath it.
pub struct WsManager {
    connections: RwLock<HashMap<SessionId, WsConnection>>,
    next_generation: AtomicU64,
}

impl WsManager {
    /// Create a new, empty session manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Register a session.
    ///
    /// Re-using a live session id replaces the previous connection. It is
    /// sent a Close frame and its channel is dropped, so the old client sees
    /// the socket close instead of going silent.
    pub async fn add(&self, session_id: SessionId) -> WsRegistration {
        let (tx, rx) = mpsc::unbounded_channel();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let conn = WsConnection {
            sender: tx,
            connected_at: chrono::Utc::now(),
            generation,
        };

        let previous = self.connections.write().await.insert(session_id.clone(), conn);
        if let Some(previous) = previous {
            tracing::warn!(session_id = %session_id, "Session id reused, replacing previous connection");
            let _ = previous.sender.send(Message::Close(None));
        }

        WsRegistration {
            generation,
            receiver: rx,
        }
    }

    /// Remove a session by its id. Returns whether it was registered.
    pub async fn remove(&self, session_id: &str) -> bool {
        self.connections.write().await.remove(session_id).is_some()
    }

    /// Remove a session only if it is still the registration identified by
    /// `generation`.
    ///
    /// A closing connection uses this so it never evicts a newer connection
    /// that reconnected under the same id.
    pub async fn remove_if_current(&self, session_id: &str, generation: u64) -> bool {
        let mut conns = self.connections.write().await;
        match conns.get(session_id) {
            Some(conn) if conn.generation == generation => {
                conns.remove(session_id);
                true
            }
            _ => false,
        }
    }

    /// Send a message to one session.
    ///
    /// An unknown session yields an empty report; the message is dropped.
    pub async fn send_to(&self, session_id: &str, message: Message) -> DeliveryReport {
        let conns = self.connections.read().await;
        let mut report = DeliveryReport::default();

        if let Some(conn) = conns.get(session_id) {
            if conn.sender.send(message).is_ok() {
                report.delivered += 1;
            } else {
                tracing::debug!(session_id = %session_id, "Session channel closed, message dropped");
                report.failed += 1;
            }
        }

        report
    }

    /// Broadcast a message to every live session.
    ///
    /// Sessions whose channels are closed are skipped without affecting the
    /// others (they are removed when their receive loop ends).
    pub async fn broadcast(&self, message: Message) -> DeliveryReport {
        let conns = self.connections.read().await;
        let mut report = DeliveryReport::default();

        for (session_id, conn) in conns.iter() {
            if conn.sender.send(message.clone()).is_ok() {
                report.delivered += 1;
            } else {
                tracing::debug!(session_id = %session_id, "Session channel closed, skipping");
                report.failed += 1;
            }
        }

        report
    }

    /// Whether a session is currently registered.
    pub async fn contains(&self, session_id: &str) -> bool {
        self.connections.read().await.contains_key(session_id)
    }

    /// Return the current number of live sessions.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every session, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket sessions");
    }

    /// Send a Ping frame to every session.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
