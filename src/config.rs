//! Benchmark configuration
//!
//! Values come from defaults, then an optional TOML file, then CLI / env
//! overrides applied by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{BenchError, BenchResult};

/// Default `host/path` rewrite for the WebSocket proxy.
pub const DEFAULT_WS_PROXY: &str = "{host}/v2?address={host}:{port}";

/// Main benchmark configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Direct connection string (through the external pooler)
    pub database_url: Option<String>,

    /// Connection string handed out by the managed pooling proxy
    pub pooler_url: Option<String>,

    /// Server bind address
    pub bind_address: String,

    /// Runs used when a request does not specify any
    pub default_runs: u32,

    /// WebSocket-tunneled serverless driver
    pub serverless: ServerlessConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pooler_url: None,
            bind_address: "0.0.0.0:8787".to_string(),
            default_runs: 10,
            serverless: ServerlessConfig::default(),
        }
    }
}

/// Serverless driver settings. Passed explicitly to every client factory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerlessConfig {
    /// Benchmark the serverless driver at all
    pub enabled: bool,

    /// Connection string for the driver; falls back to `database_url`
    pub database_url: Option<String>,

    /// Proxy address template with `{host}` and `{port}` placeholders
    pub ws_proxy: String,

    /// Use `wss://` instead of `ws://`
    pub use_secure_websocket: bool,
}

impl Default for ServerlessConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            database_url: None,
            ws_proxy: DEFAULT_WS_PROXY.to_string(),
            use_secure_websocket: true,
        }
    }
}

impl ServerlessConfig {
    /// Proxy address for a database `host:port`.
    pub fn proxy_address(&self, host: &str, port: u16) -> String {
        self.ws_proxy
            .replace("{host}", host)
            .replace("{port}", &port.to_string())
    }

    /// Full WebSocket URL for a database `host:port`.
    pub fn websocket_url(&self, host: &str, port: u16) -> String {
        let scheme = if self.use_secure_websocket { "wss" } else { "ws" };
        format!("{}://{}", scheme, self.proxy_address(host, port))
    }
}

impl BenchConfig {
    /// Parse a TOML document.
    pub fn from_toml(contents: &str) -> BenchResult<Self> {
        toml::from_str(contents).map_err(|e| BenchError::Config(e.to_string()))
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load `path` if given, else the default location if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> BenchResult<Self> {
        if let Some(path) = path {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// The direct connection string, which every deployment needs.
    pub fn database_url(&self) -> BenchResult<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| BenchError::Config("Missing database_url (set DATABASE_URL)".to_string()))
    }
}

/// `<config dir>/pg-edge-bench/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pg-edge-bench").join("config.toml"))
}
