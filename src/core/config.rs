//! Configuration management.
//!
//! This module provides a centralized configuration structure populated
//! from environment variables (and a `.env` file, if present) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Which application this process runs.
    pub service: ServiceRole,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Downstream tool servers used by the conversation host.
    pub upstream: UpstreamConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the service as reported in logs.
    pub name: String,

    /// The version of the service.
    pub version: String,
}

/// The application a process serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRole {
    /// Conversation host routing questions to tool servers.
    #[default]
    Host,
    /// Math Toolkit tool server.
    Math,
    /// Weather Toolkit tool server.
    Weather,
}

impl ServiceRole {
    /// Port used when none is configured.
    pub fn default_port(self) -> u16 {
        match self {
            Self::Host => 8000,
            Self::Math => 8001,
            Self::Weather => 8002,
        }
    }
}

impl FromStr for ServiceRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "host" | "conversation" => Ok(Self::Host),
            "math" => Ok(Self::Math),
            "weather" => Ok(Self::Weather),
            other => Err(format!("unknown service role '{other}'")),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Where the conversation host finds its tool servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the Math Toolkit.
    pub math_url: String,

    /// Base URL of the Weather Toolkit.
    pub weather_url: String,

    /// Bound on one whole tool invocation, in seconds.
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            math_url: "http://localhost:8001".to_string(),
            weather_url: "http://localhost:8002".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "conversation-host".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            service: ServiceRole::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Service variables are prefixed with `MCP_` (`MCP_SERVICE`,
    /// `MCP_LOG_LEVEL`, `MCP_HTTP_PORT`, ...); downstream URLs use
    /// `MATH_MCP_URL` and `WEATHER_MCP_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(role) = std::env::var("MCP_SERVICE") {
            match role.parse() {
                Ok(role) => config.service = role,
                Err(e) => warn!("Ignoring MCP_SERVICE: {}", e),
            }
        }

        config.server.name = match config.service {
            ServiceRole::Host => "conversation-host",
            ServiceRole::Math => "math-toolkit",
            ServiceRole::Weather => "weather-toolkit",
        }
        .to_string();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env(config.service.default_port());

        if let Ok(url) = std::env::var("MATH_MCP_URL") {
            config.upstream.math_url = url;
        }

        if let Ok(url) = std::env::var("WEATHER_MCP_URL") {
            config.upstream.weather_url = url;
        }

        if let Ok(timeout) = std::env::var("MCP_TOOL_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.upstream.timeout_secs = secs,
                _ => warn!("Ignoring invalid MCP_TOOL_TIMEOUT_SECS: {}", timeout),
            }
        }

        if config.service == ServiceRole::Host {
            info!(
                "Upstream tool servers: math={} weather={}",
                config.upstream.math_url, config.upstream.weather_url
            );
        }

        config
    }
}
