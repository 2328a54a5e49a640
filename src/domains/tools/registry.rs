//! Tool Registry - explicit name → handler mapping.
//!
//! The registry is built once at startup and is read-only afterwards; the
//! server shares it behind an `Arc`.

use std::sync::Arc;
use tracing::warn;

use super::handlers::{ToolDescriptor, ToolHandler};

/// Tool registry - manages all available tools in registration order.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    ///
    /// A later registration for the same name replaces the earlier one.
    pub fn register<T: ToolHandler + 'static>(&mut self, tool: T) -> &mut Self {
        let tool: Arc<dyn ToolHandler> = Arc::new(tool);
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => {
                warn!("Replacing previously registered tool: {}", tool.name());
                self.tools[index] = tool;
            }
            None => self.tools.push(tool),
        }
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_tool<T: ToolHandler + 'static>(mut self, tool: T) -> Self {
        self.register(tool);
        self
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Descriptors of every registered tool.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
