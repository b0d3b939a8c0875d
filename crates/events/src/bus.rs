//! In-process notification bus backed by an unbounded `tokio::sync::mpsc`
//! channel.
//!
//! [`NotificationBus`] is the producer handle. It is cheap to clone and can
//! be handed to any number of producers; every clone feeds the same queue.
//! The matching [`NotificationReceiver`] is consumed by exactly one drain
//! loop, which sees messages in the exact order `publish` was called.

use aicreate_core::types::SessionId;
use serde::Serialize;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// Well-known event type tags. The bus treats `event_type` as opaque; these
/// are the tags the client understands.
pub mod event_types {
    pub const STATUS: &str = "status";
    pub const PROGRESS: &str = "progress";
    pub const EXECUTING: &str = "executing";
    pub const EXECUTED: &str = "executed";
    pub const EXECUTION_ERROR: &str = "execution_error";
}

// ---------------------------------------------------------------------------
// NotificationMessage
// ---------------------------------------------------------------------------

/// A single notification destined for one session or for all of them.
///
/// Serializes to the client wire form `{"type": ..., "data": ...}`; the
/// routing target is not part of the wire form.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMessage {
    /// Semantic kind, e.g. `"progress"`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Free-form JSON payload.
    #[serde(rename = "data")]
    pub payload: serde_json::Value,

    /// Deliver only to this session when set; broadcast otherwise.
    #[serde(skip)]
    pub target_session: Option<SessionId>,
}

impl NotificationMessage {
    /// Create a broadcast message with an empty object payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            payload: serde_json::Value::Object(Default::default()),
            target_session: None,
        }
    }

    /// Set the JSON payload for the message.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Restrict delivery to a single session.
    pub fn to_session(mut self, session_id: impl Into<SessionId>) -> Self {
        self.target_session = Some(session_id.into());
        self
    }

    /// Encode the wire form sent to clients.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// NotificationBus
// ---------------------------------------------------------------------------

/// Consuming end of the bus. Exactly one exists per bus.
pub type NotificationReceiver = mpsc::UnboundedReceiver<NotificationMessage>;

/// Producer handle for the notification queue.
///
/// # Usage
///
/// ```rust
/// use aicreate_events::{NotificationBus, NotificationMessage};
///
/// let (bus, mut rx) = NotificationBus::channel();
///
/// bus.publish(NotificationMessage::new("status"));
/// assert_eq!(rx.try_recv().unwrap().event_type, "status");
/// ```
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: mpsc::UnboundedSender<NotificationMessage>,
}

impl NotificationBus {
    /// Create a bus and the receiver its drain loop will consume.
    pub fn channel() -> (Self, NotificationReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Append a message to the tail of the queue.
    ///
    /// Never blocks and never fails from the caller's point of view. If the
    /// drain loop is gone the message is discarded.
    pub fn publish(&self, message: NotificationMessage) {
        if let Err(mpsc::error::SendError(message)) = self.sender.send(message) {
            tracing::trace!(
                event_type = %message.event_type,
                "Notification dropped, drain loop not running"
            );
        }
    }

    /// Shorthand for publishing a payload with an optional target.
    pub fn send(
        &self,
        event_type: impl Into<String>,
        payload: serde_json::Value,
        target_session: Option<SessionId>,
    ) {
        let mut message = NotificationMessage::new(event_type).with_payload(payload);
        message.target_session = target_session;
        self.publish(message);
    }

    /// Whether the drain loop's receiver has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
