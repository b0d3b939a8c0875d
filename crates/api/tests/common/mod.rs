#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use aicreate_api::config::ServerConfig;
use aicreate_api::router::build_app_router;
use aicreate_api::state::AppState;
use aicreate_api::ws::WsManager;
use aicreate_core::error::NodeError;
use aicreate_core::node::{type_tags, Describable, InputSpec, InputType};
use aicreate_core::registry::NodeRegistry;
use aicreate_events::NotificationBus;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// Build a test `ServerConfig` serving the given web root.
///
/// Binds `127.0.0.1` on an ephemeral port with a 30-second request timeout.
pub fn test_config(web_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        web_root: web_root.to_path_buf(),
        input_dir: web_root.join("input"),
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
        max_body_bytes: 1024,
    }
}

/// Write a minimal client bundle into a fresh temp directory.
pub fn web_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>aicreate</html>").unwrap();
    std::fs::create_dir(dir.path().join("scripts")).unwrap();
    std::fs::write(dir.path().join("scripts/app.js"), "export const app = {};").unwrap();
    std::fs::write(dir.path().join("style.css"), "body {}").unwrap();
    std::fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();
    dir
}

/// Build the full application router around `registry`.
///
/// Returns the web root so it outlives the router.
pub fn build_test_app(registry: NodeRegistry) -> (Router, TempDir) {
    let web_root = web_root();
    let config = test_config(web_root.path());
    let (bus, _receiver) = NotificationBus::channel();

    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::new(registry),
        ws_manager: Arc::new(WsManager::new()),
        bus,
        prompt_queue: None,
    };

    (build_app_router(state, &config), web_root)
}

/// Issue a GET request against the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body into a string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Test node types
// ---------------------------------------------------------------------------

/// Node with a fixed schema.
pub struct StaticNode {
    pub input: &'static str,
    pub outputs: &'static [&'static str],
    pub category: Option<&'static str>,
}

impl Describable for StaticNode {
    fn input_types(&self) -> Result<InputSpec, NodeError> {
        Ok(InputSpec::new().required("value", InputType::of(self.input)))
    }

    fn return_types(&self) -> &[&str] {
        self.outputs
    }

    fn category(&self) -> Option<&str> {
        self.category
    }
}

/// Node whose self-description always fails.
pub struct FailingNode;

impl Describable for FailingNode {
    fn input_types(&self) -> Result<InputSpec, NodeError> {
        Err(NodeError::Unavailable("backing resource gone".into()))
    }

    fn return_types(&self) -> &[&str] {
        &[type_tags::IMAGE]
    }
}

/// Registry with `First`, `Second` (failing) and `Third`.
pub fn registry_with_failure() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    registry
        .register(
            "First",
            StaticNode {
                input: type_tags::IMAGE,
                outputs: &[type_tags::IMAGE],
                category: Some("basic"),
            },
        )
        .unwrap();
    registry.register("Second", FailingNode).unwrap();
    registry
        .register(
            "Third",
            StaticNode {
                input: type_tags::NUMBER,
                outputs: &[type_tags::NUMBER, type_tags::STRING],
                category: None,
            },
        )
        .unwrap();
    registry
}
