//! Server lifecycle: bind, start the drain loop, serve until shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use aicreate_core::queue::PromptQueue;
use aicreate_core::registry::NodeRegistry;
use aicreate_events::{NotificationBus, NotificationReceiver};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::notifications::NotificationRouter;
use crate::router::build_app_router;
use crate::state::AppState;
use crate::ws::{self, WsManager};

/// Invoked with the bound address once the listener is up.
pub type StartCallback = Box<dyn FnOnce(SocketAddr) + Send>;

/// The front-end server: HTTP routes plus the notification drain loop.
///
/// Construct with [`Server::new`], hand [`Server::bus`] clones to producers,
/// then call [`Server::run`].
pub struct Server {
    state: AppState,
    receiver: NotificationReceiver,
}

impl Server {
    /// Create a server around an already-populated node registry.
    pub fn new(config: ServerConfig, registry: NodeRegistry) -> Self {
        let (bus, receiver) = NotificationBus::channel();
        let state = AppState {
            config: Arc::new(config),
            registry: Arc::new(registry),
            ws_manager: Arc::new(WsManager::new()),
            bus,
            prompt_queue: None,
        };

        Self { state, receiver }
    }

    /// Attach the work queue whose depth is reported to clients.
    pub fn with_prompt_queue(mut self, queue: Arc<dyn PromptQueue>) -> Self {
        self.state.prompt_queue = Some(queue);
        self
    }

    /// Producer handle for publishing notifications to clients.
    pub fn bus(&self) -> NotificationBus {
        self.state.bus.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Bind, then run the HTTP server and the drain loop together until
    /// `shutdown` resolves.
    ///
    /// A bind failure is returned before anything is served and before
    /// `on_start` is called. If the drain loop stops while serving, the
    /// server shuts down and returns [`ServerError::DrainLoopExited`].
    pub async fn run<F>(self, on_start: Option<StartCallback>, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Server { state, receiver } = self;
        let config = Arc::clone(&state.config);
        let ws_manager = Arc::clone(&state.ws_manager);

        let host = config.bind_host();
        let bind_error = |source| ServerError::Bind {
            addr: format!("{host}:{}", config.port),
            source,
        };
        let listener = TcpListener::bind((host, config.port))
            .await
            .map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        tracing::info!(%local_addr, node_types = state.registry.len(), "Server listening");
        tracing::info!("To see the GUI go to: http://{local_addr}");
        if let Some(on_start) = on_start {
            on_start(local_addr);
        }

        let router = NotificationRouter::new(Arc::clone(&ws_manager));
        let mut drain_handle = tokio::spawn(router.run(receiver));
        let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

        let app = build_app_router(state, &config);
        let closing = Arc::clone(&ws_manager);
        let serve = async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown.await;
                    tracing::info!("Shutdown requested, closing WebSocket sessions");
                    closing.shutdown_all().await;
                })
                .await
        };

        let result = tokio::select! {
            served = serve => served.map_err(ServerError::Serve),
            _ = &mut drain_handle => {
                tracing::error!("Notification drain loop exited, server degraded");
                Err(ServerError::DrainLoopExited)
            }
        };

        ws_manager.shutdown_all().await;
        heartbeat_handle.abort();
        drain_handle.abort();
        tracing::info!("Server stopped");

        result
    }
}
