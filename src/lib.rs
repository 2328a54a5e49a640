//! Streaming MCP Host Library
//!
//! Tool servers that narrate each invocation as newline-delimited JSON
//! events, a client that reduces such a stream to a single result, and a
//! conversation host that routes free-text questions to the right tool.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the tool server and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Event protocol, tool handlers and the bundled toolkits
//!   - **client**: Streaming invocation client and typed façades
//!   - **conversation**: Intent detection, routing and reply formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use streaming_mcp_host::core::{Application, ToolServer, TransportConfig, TransportService};
//! use streaming_mcp_host::domains::tools::definitions::math_registry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = ToolServer::new("Math Toolkit", math_registry());
//!     TransportService::new(TransportConfig::http(8001, "127.0.0.1"))
//!         .run(Application::Tools(server))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Result, ToolServer};
pub use domains::client::{ToolClient, ToolInvocationError, ToolResponse};
