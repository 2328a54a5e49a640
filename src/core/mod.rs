//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the services,
//! including error handling, configuration, the tool server and the
//! transport layer.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, ServiceRole};
pub use error::{Error, Result};
pub use server::{EventStream, PreparedInvocation, ServerManifest, ToolServer};
pub use transport::{
    Application, TransportConfig, TransportService, conversation_routes, tool_server_routes,
};
