//! Transport service - wires an application onto the HTTP transport.
//!
//! This service provides a unified interface for starting either a tool
//! server or the conversation host.

use axum::Router;
use tracing::info;

use super::http::{HttpTransport, conversation_routes, tool_server_routes};
use super::{TransportConfig, TransportResult};
use crate::core::server::ToolServer;
use crate::domains::conversation::ConversationRouter;

/// The application a process serves.
pub enum Application {
    /// A tool server streaming invocation events.
    Tools(ToolServer),
    /// The conversation host routing questions to tool servers.
    Conversation(ConversationRouter),
}

impl Application {
    /// Build the axum router for this application.
    pub fn into_router(self) -> Router {
        match self {
            Self::Tools(server) => tool_server_routes(server),
            Self::Conversation(router) => conversation_routes(router),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Tools(server) => format!("tool server '{}'", server.name()),
            Self::Conversation(_) => "conversation host".to_string(),
        }
    }
}

/// Transport service - manages the transport layer for one application.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Start the transport with the given application.
    ///
    /// This method blocks until the transport is shut down.
    pub async fn run(self, application: Application) -> TransportResult<()> {
        info!(
            "Starting {} via {}",
            application.label(),
            self.config.description()
        );
        HttpTransport::new(self.config)
            .run(application.into_router())
            .await
    }
}
