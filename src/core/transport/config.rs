//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::http(8000, default_host())
    }
}

impl TransportConfig {
    /// Create an HTTP transport config.
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self {
            port,
            host: host.into(),
            enable_cors: default_cors(),
        }
    }

    /// Load transport config from environment variables.
    ///
    /// `default_port` applies when `MCP_HTTP_PORT` is unset or invalid.
    pub fn from_env(default_port: u16) -> Self {
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(default_port);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);
        Self {
            port,
            host,
            enable_cors,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!("HTTP on {}", self.address())
    }
}
