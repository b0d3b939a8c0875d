pub mod health;
pub mod object_info;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the API route tree.
///
/// ```text
/// /ws                      WebSocket (optional ?clientId=)
/// /object_info             catalog of every node type
/// /object_info/{type_id}   a single node type
/// /health                  service status
/// ```
///
/// Static assets are not mounted here; see
/// [`build_app_router`](crate::router::build_app_router).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(object_info::router())
        .merge(health::router())
}
