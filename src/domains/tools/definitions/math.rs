//! Arithmetic tools served by the Math Toolkit.
//!
//! Each operation is its own tool (`add`, `subtract`, `multiply`) taking
//! `{a, b}` and returning `{operation, operands, total}`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use crate::domains::tools::{ToolError, ToolHandler, ToolRegistry, parse_arguments, schema_for};

/// Server name reported on the metadata endpoint.
pub const MATH_SERVER_NAME: &str = "Math Toolkit";

// ============================================================================
// Operations
// ============================================================================

/// The closed set of arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathOperation {
    Add,
    Subtract,
    Multiply,
}

impl MathOperation {
    pub const ALL: [MathOperation; 3] = [Self::Add, Self::Subtract, Self::Multiply];

    /// Tool name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Add => "Add two numbers.",
            Self::Subtract => "Subtract the second number from the first.",
            Self::Multiply => "Multiply two numbers.",
        }
    }
}

impl fmt::Display for MathOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`MathOperation::from_str`] for names outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl FromStr for MathOperation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters shared by every arithmetic tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ArithmeticParams {
    /// First operand.
    pub a: f64,

    /// Second operand.
    pub b: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// One arithmetic operation exposed as a tool.
pub struct ArithmeticTool {
    operation: MathOperation,
}

impl ArithmeticTool {
    pub fn new(operation: MathOperation) -> Self {
        Self { operation }
    }

    /// Execute the tool logic.
    pub fn execute(&self, params: &ArithmeticParams) -> Value {
        let total = self.operation.apply(params.a, params.b);
        json!({
            "operation": self.operation.as_str(),
            "operands": [params.a, params.b],
            "total": total,
        })
    }
}

#[async_trait::async_trait]
impl ToolHandler for ArithmeticTool {
    fn name(&self) -> &str {
        self.operation.as_str()
    }

    fn description(&self) -> &str {
        self.operation.description()
    }

    fn input_schema(&self) -> Option<Value> {
        schema_for::<ArithmeticParams>()
    }

    #[instrument(skip_all, fields(operation = %self.operation))]
    async fn call(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: ArithmeticParams = parse_arguments(arguments)?;
        debug!("Computing {} of {} and {}", self.operation, params.a, params.b);
        Ok(self.execute(&params))
    }
}

/// Registry holding the three arithmetic tools.
pub fn math_registry() -> ToolRegistry {
    MathOperation::ALL
        .into_iter()
        .fold(ToolRegistry::new(), |registry, op| {
            registry.with_tool(ArithmeticTool::new(op))
        })
}

/// Metadata advertised by the Math Toolkit.
pub fn math_metadata() -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(
        "description".to_string(),
        Value::from("Basic arithmetic operations exposed over MCP."),
    );
    metadata
}
