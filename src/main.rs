//! Service Entry Point
//!
//! Initializes logging, loads configuration, builds the application selected
//! by `MCP_SERVICE` (host, math or weather) and serves it over HTTP.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use streaming_mcp_host::core::{
    Application, Config, ServiceRole, ToolServer, TransportService,
};
use streaming_mcp_host::domains::client::{MathClient, ToolClient, WeatherClient};
use streaming_mcp_host::domains::conversation::ConversationRouter;
use streaming_mcp_host::domains::tools::definitions::{
    MATH_SERVER_NAME, WEATHER_SERVER_NAME, math_metadata, math_registry, weather_registry,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let application = build_application(&config)?;

    info!("Application initialized");

    TransportService::new(config.transport)
        .run(application)
        .await?;

    info!("Server shutting down");

    Ok(())
}

/// Build the application for the configured role.
fn build_application(config: &Config) -> streaming_mcp_host::Result<Application> {
    let application = match config.service {
        ServiceRole::Math => Application::Tools(
            ToolServer::new(MATH_SERVER_NAME, math_registry()).with_metadata(math_metadata()),
        ),
        ServiceRole::Weather => Application::Tools(
            ToolServer::new(WEATHER_SERVER_NAME, weather_registry())
                .with_progress_heartbeat(true),
        ),
        ServiceRole::Host => {
            let timeout = config.upstream.timeout();
            let math = ToolClient::new(&config.upstream.math_url, timeout)?;
            let weather = ToolClient::new(&config.upstream.weather_url, timeout)?;
            Application::Conversation(ConversationRouter::new(
                MathClient::new(math),
                WeatherClient::new(weather),
            ))
        }
    };
    Ok(application)
}

/// Logs go to stderr. `RUST_LOG` wins over the configured level; an
/// unparsable level falls back to `info`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
