//! Tool handlers module.
//!
//! Every tool, synchronous or not, is exposed to the server through the
//! single asynchronous [`ToolHandler`] contract. Tools with a typed
//! parameter struct implement the trait directly; ad-hoc tools can be
//! registered as closures through [`FnTool`].

use std::future::Future;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ToolError;

/// Public description of a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

/// Trait implemented by every invocable tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the name of this tool.
    fn name(&self) -> &str;

    /// Get the description of this tool.
    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments, if known.
    fn input_schema(&self) -> Option<Value> {
        None
    }

    /// Execute the tool with keyword-style arguments.
    async fn call(&self, arguments: Map<String, Value>) -> Result<Value, ToolError>;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Decode keyword arguments into a typed parameter struct.
///
/// Shape mismatches become [`ToolError::InvalidArguments`], which the
/// server reports as an `error` event.
pub fn parse_arguments<P: DeserializeOwned>(arguments: Map<String, Value>) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// JSON schema for a parameter struct.
pub fn schema_for<P: JsonSchema>() -> Option<Value> {
    serde_json::to_value(schemars::schema_for!(P)).ok()
}

/// A tool backed by a closure.
pub struct FnTool<F> {
    name: String,
    description: String,
    func: F,
}

impl<F, Fut> FnTool<F>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, description: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            func,
        }
    }
}

#[async_trait::async_trait]
impl<F, Fut> ToolHandler for FnTool<F>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn call(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        (self.func)(arguments).await
    }
}
