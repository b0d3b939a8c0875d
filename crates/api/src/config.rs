use std::path::PathBuf;

use axum::http::HeaderValue;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8188;

/// Largest accepted request body (20 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Server configuration.
///
/// [`Default`] gives values suitable for local development. The binary
/// overrides them from environment variables via [`ServerConfig::from_env`];
/// library code only ever receives a finished config.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`). Empty means all interfaces.
    pub host: String,
    /// Bind port (default: `8188`, `0` picks an ephemeral port).
    pub port: u16,
    /// Directory holding the client bundle (`index.html`, scripts, styles).
    pub web_root: PathBuf,
    /// Directory the image loader node offers files from.
    pub input_dir: PathBuf,
    /// Allowed CORS origins (default: none).
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes (default: 20 MiB).
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            web_root: PathBuf::from("web"),
            input_dir: PathBuf::from("input"),
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// [`Default`] for anything unset.
    ///
    /// | Env Var                | Default        |
    /// |------------------------|----------------|
    /// | `HOST`                 | `127.0.0.1`    |
    /// | `PORT`                 | `8188`         |
    /// | `WEB_ROOT`             | `web`          |
    /// | `INPUT_DIR`            | `input`        |
    /// | `CORS_ORIGINS`         | (none)         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`           |
    /// | `MAX_BODY_BYTES`       | `20971520`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var("PORT")? {
            config.port = port;
        }
        if let Ok(web_root) = std::env::var("WEB_ROOT") {
            config.web_root = web_root.into();
        }
        if let Ok(input_dir) = std::env::var("INPUT_DIR") {
            config.input_dir = input_dir.into();
        }
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.cors_origins = parse_origins(&origins)?;
        }
        if let Some(secs) = parse_var("REQUEST_TIMEOUT_SECS")? {
            config.request_timeout_secs = secs;
        }
        if let Some(bytes) = parse_var("MAX_BODY_BYTES")? {
            config.max_body_bytes = bytes;
        }

        Ok(config)
    }

    /// Host to bind, with an empty value meaning all interfaces.
    pub fn bind_host(&self) -> &str {
        if self.host.is_empty() {
            "0.0.0.0"
        } else {
            &self.host
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value }),
        Err(_) => Ok(None),
    }
}

/// Parse a comma-separated origin list, skipping empty entries.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            origin.parse().map_err(|_| ConfigError {
                var: "CORS_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect()
}
