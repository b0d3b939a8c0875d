use aicreate_core::error::NodeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No node type is registered under the requested id.
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// A node type failed to describe itself.
    #[error("Node type {type_id} failed to describe itself: {source}")]
    Describe {
        type_id: String,
        #[source]
        source: NodeError,
    },

    /// Unexpected server-side failure; the detail is logged, not returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnknownNodeType(type_id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Node type {type_id} not found"),
            ),
            AppError::Describe { type_id, source } => {
                tracing::error!(type_id = %type_id, error = %source, "Node description failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Fatal errors raised while starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listening socket could not be set up.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP serving loop failed.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The notification drain loop stopped while the server was running.
    #[error("Notification drain loop exited unexpectedly")]
    DrainLoopExited,
}
