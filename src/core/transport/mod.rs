//! Transport layer.
//!
//! Every service speaks HTTP:
//! - tool servers stream newline-delimited events from `POST /tools/{name}`
//! - the conversation host answers `POST /conversation`
//!
//! The transport handles the listener lifecycle and delegates request
//! processing to the tool server or the conversation router.

mod config;
mod error;
pub mod http;
mod service;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, conversation_routes, tool_server_routes};
pub use service::{Application, TransportService};
