//! Drain loop that moves notifications from the bus to live sessions.
//!
//! [`NotificationRouter`] is the single consumer of the bus. It takes
//! messages in publish order and hands each one to its target session, or to
//! every session when the message has no target.

use std::sync::Arc;

use aicreate_events::{NotificationMessage, NotificationReceiver};
use axum::extract::ws::Message;

use crate::ws::{DeliveryReport, WsManager};

/// Routes bus notifications to WebSocket sessions.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a router delivering through the given session manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the drain loop.
    ///
    /// Runs for as long as any [`NotificationBus`](aicreate_events::NotificationBus)
    /// handle is alive. A failed delivery never stops the loop and the
    /// message is not retried.
    pub async fn run(self, mut receiver: NotificationReceiver) {
        tracing::info!("Notification drain loop started");

        while let Some(message) = receiver.recv().await {
            self.deliver(&message).await;
        }

        tracing::warn!("Notification bus closed, drain loop exiting");
    }

    /// Deliver a single message and report how many sessions took it.
    pub async fn deliver(&self, message: &NotificationMessage) -> DeliveryReport {
        let text = match message.to_json() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event_type = %message.event_type,
                    "Failed to encode notification"
                );
                return DeliveryReport::default();
            }
        };
        let frame = Message::Text(text.into());

        match &message.target_session {
            Some(session_id) => {
                let report = self.ws_manager.send_to(session_id, frame).await;
                if report.delivered == 0 {
                    tracing::trace!(
                        session_id = %session_id,
                        event_type = %message.event_type,
                        "Target session not live, notification dropped"
                    );
                }
                report
            }
            None => self.ws_manager.broadcast(frame).await,
        }
    }
}
