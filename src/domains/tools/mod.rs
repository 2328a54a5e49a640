//! Tools domain module.
//!
//! Server side of the tool-invocation protocol: the event vocabulary, the
//! handler contract every tool implements, and the registry a server
//! dispatches from.
//!
//! ## Architecture
//!
//! - `definitions/` - The bundled tools (math and weather toolkits)
//! - `event.rs` - Stream events and their line encoding
//! - `handlers.rs` - The async `ToolHandler` contract and closure adapter
//! - `registry.rs` - Name → handler mapping
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
pub mod event;
mod handlers;
mod registry;

pub use error::ToolError;
pub use event::{EVENT_STREAM_CONTENT_TYPE, EventStatus, ToolEvent};
pub use handlers::{FnTool, ToolDescriptor, ToolHandler, parse_arguments, schema_for};
pub use registry::ToolRegistry;
