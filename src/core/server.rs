//! Tool server implementation.
//!
//! This module contains the server handler that owns a tool registry and
//! narrates each invocation as an ordered stream of events:
//!
//! ```text
//! START → STARTED → {PROGRESS}* → (COMPLETED | ERROR) → CLOSED
//! ```
//!
//! A failing tool produces two observable effects: the terminal `error`
//! event, then an `Err` item carrying the failure itself. The HTTP layer
//! writes the event and uses the `Err` to abort the response body.

use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::domains::tools::{ToolDescriptor, ToolError, ToolEvent, ToolHandler, ToolRegistry};

/// Event stream of one invocation.
///
/// Yields `Ok` events in protocol order. An `Err` item only ever follows a
/// terminal `error` event and is always the final item.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ToolEvent, ToolError>> + Send>>;

/// Document served on the well-known metadata endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerManifest {
    pub name: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub tools: Vec<String>,
    #[serde(default)]
    pub descriptors: Vec<ToolDescriptor>,
}

/// A named server exposing a read-only tool registry.
#[derive(Clone)]
pub struct ToolServer {
    name: String,
    metadata: Map<String, Value>,
    registry: Arc<ToolRegistry>,
    progress_heartbeat: bool,
}

impl ToolServer {
    /// Create a server over an already populated registry.
    pub fn new(name: impl Into<String>, registry: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            metadata: Map::new(),
            registry: Arc::new(registry),
            progress_heartbeat: false,
        }
    }

    /// Attach free-form metadata to the manifest.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Emit a `progress` event between `started` and the tool call.
    pub fn with_progress_heartbeat(mut self, enabled: bool) -> Self {
        self.progress_heartbeat = enabled;
        self
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Build the metadata document.
    pub fn manifest(&self) -> ServerManifest {
        ServerManifest {
            name: self.name.clone(),
            metadata: self.metadata.clone(),
            tools: self
                .registry
                .tool_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            descriptors: self.registry.descriptors(),
        }
    }

    /// Resolve a tool by name.
    ///
    /// Unknown names fail here, before any event exists.
    #[instrument(skip(self), fields(server = %self.name))]
    pub fn prepare(&self, tool_name: &str) -> Result<PreparedInvocation, ToolError> {
        let Some(tool) = self.registry.get(tool_name) else {
            warn!("Unknown tool requested: {}", tool_name);
            return Err(ToolError::not_found(tool_name));
        };

        Ok(PreparedInvocation {
            tool_name: tool_name.to_string(),
            tool,
            heartbeat: self.progress_heartbeat,
        })
    }

    /// Resolve and start a tool in one step.
    pub fn invoke(
        &self,
        tool_name: &str,
        arguments: Map<String, Value>,
    ) -> Result<EventStream, ToolError> {
        Ok(self.prepare(tool_name)?.stream(arguments))
    }
}

/// A resolved tool, ready to run once its arguments are known.
pub struct PreparedInvocation {
    tool_name: String,
    tool: Arc<dyn ToolHandler>,
    heartbeat: bool,
}

impl PreparedInvocation {
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Run the tool. The stream is lazy: nothing happens until it is polled.
    pub fn stream(self, arguments: Map<String, Value>) -> EventStream {
        let Self {
            tool_name,
            tool,
            heartbeat,
        } = self;
        info!("Invoking tool: {}", tool_name);

        Box::pin(async_stream::stream! {
            yield Ok(ToolEvent::started(&tool_name));

            if heartbeat {
                tokio::task::yield_now().await;
                yield Ok(ToolEvent::progress("processing"));
            }

            match tool.call(arguments).await {
                Ok(result) => {
                    debug!("Tool {} completed", tool_name);
                    yield Ok(ToolEvent::completed(result));
                }
                Err(err) => {
                    warn!("Tool {} failed: {}", tool_name, err);
                    yield Ok(ToolEvent::error(err.to_string()));
                    yield Err(err);
                }
            }
        })
    }
}
