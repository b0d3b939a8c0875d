use std::sync::Arc;

use aicreate_core::queue::PromptQueue;
use aicreate_core::registry::NodeRegistry;
use aicreate_events::NotificationBus;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Catalog of node types, built once at startup.
    pub registry: Arc<NodeRegistry>,
    /// WebSocket session manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Producer handle of the notification bus.
    pub bus: NotificationBus,
    /// Work queue, once one is attached.
    pub prompt_queue: Option<Arc<dyn PromptQueue>>,
}

impl AppState {
    /// Number of queued prompts, or zero without a queue.
    pub fn queue_remaining(&self) -> usize {
        self.prompt_queue.as_ref().map_or(0, |queue| queue.remaining())
    }
}
