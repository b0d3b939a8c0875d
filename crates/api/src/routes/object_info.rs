use std::sync::Arc;

use aicreate_core::node::NodeDescriptor;
use aicreate_core::registry::{Catalog, NodeRegistry};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use indexmap::IndexMap;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Node catalog keyed by type id.
pub type ObjectInfo = IndexMap<String, NodeDescriptor>;

/// Build the full catalog off the async workers.
///
/// Nodes may read the filesystem while describing themselves, so the
/// registry is queried on the blocking pool.
pub async fn load_catalog(registry: Arc<NodeRegistry>) -> AppResult<Catalog> {
    tokio::task::spawn_blocking(move || registry.list_all())
        .await
        .map_err(|e| AppError::InternalError(format!("Catalog task failed: {e}")))
}

/// GET /object_info -- describe every registered node type.
///
/// Node types that fail to describe themselves are left out.
async fn list_object_info(State(state): State<AppState>) -> AppResult<Json<ObjectInfo>> {
    let catalog = load_catalog(Arc::clone(&state.registry)).await?;
    Ok(Json(catalog.nodes))
}

/// GET /object_info/{type_id} -- describe one node type.
async fn get_object_info(
    State(state): State<AppState>,
    Path(type_id): Path<String>,
) -> AppResult<Json<ObjectInfo>> {
    let registry = Arc::clone(&state.registry);
    let lookup_id = type_id.clone();
    let described = tokio::task::spawn_blocking(move || registry.describe(&lookup_id))
        .await
        .map_err(|e| AppError::InternalError(format!("Describe task failed: {e}")))?;

    let descriptor = described
        .ok_or_else(|| AppError::UnknownNodeType(type_id.clone()))?
        .map_err(|source| AppError::Describe {
            type_id: type_id.clone(),
            source,
        })?;

    let mut info = ObjectInfo::new();
    info.insert(type_id, descriptor);
    Ok(Json(info))
}

/// Mount node catalog routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/object_info", get(list_object_info))
        .route("/object_info/{type_id}", get(get_object_info))
}
