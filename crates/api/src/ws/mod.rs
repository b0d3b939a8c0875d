//! WebSocket infrastructure for real-time notifications.
//!
//! Provides session bookkeeping, heartbeat monitoring, and the HTTP upgrade
//! handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::{status_message, ws_handler, WsParams};
pub use heartbeat::start_heartbeat;
pub use manager::{DeliveryReport, WsManager, WsRegistration};
