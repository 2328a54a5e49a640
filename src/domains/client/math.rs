//! Typed client for the Math Toolkit.

use serde_json::{Map, Value};

use super::{ToolClient, ToolInvocationError, ToolResponse};
use crate::domains::tools::definitions::MathOperation;

/// Façade binding the arithmetic tools to `(a, b)` calls.
#[derive(Debug, Clone)]
pub struct MathClient {
    client: ToolClient,
}

impl MathClient {
    pub fn new(client: ToolClient) -> Self {
        Self { client }
    }

    pub async fn add(&self, a: f64, b: f64) -> Result<ToolResponse, ToolInvocationError> {
        self.invoke(MathOperation::Add, a, b).await
    }

    pub async fn subtract(&self, a: f64, b: f64) -> Result<ToolResponse, ToolInvocationError> {
        self.invoke(MathOperation::Subtract, a, b).await
    }

    pub async fn multiply(&self, a: f64, b: f64) -> Result<ToolResponse, ToolInvocationError> {
        self.invoke(MathOperation::Multiply, a, b).await
    }

    /// Dispatch a symbolic operation name over `{add, subtract, multiply}`.
    pub async fn calculate(
        &self,
        operation: &str,
        a: f64,
        b: f64,
    ) -> Result<ToolResponse, ToolInvocationError> {
        let operation: MathOperation = operation
            .parse()
            .map_err(|_| ToolInvocationError::UnsupportedOperation(operation.to_string()))?;

        match operation {
            MathOperation::Add => self.add(a, b).await,
            MathOperation::Subtract => self.subtract(a, b).await,
            MathOperation::Multiply => self.multiply(a, b).await,
        }
    }

    async fn invoke(
        &self,
        operation: MathOperation,
        a: f64,
        b: f64,
    ) -> Result<ToolResponse, ToolInvocationError> {
        let mut arguments = Map::new();
        arguments.insert("a".to_string(), Value::from(a));
        arguments.insert("b".to_string(), Value::from(b));
        self.client.invoke(operation.as_str(), arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::InvocationErrorKind;

    #[tokio::test]
    async fn test_unsupported_operation_never_touches_network() {
        // Nothing listens on this address; a network call would be a transport failure.
        let client = MathClient::new(ToolClient::with_http_client(
            "http://127.0.0.1:9",
            reqwest::Client::new(),
        ));
        let err = client.calculate("divide", 1.0, 2.0).await.unwrap_err();
        assert_eq!(err.kind(), InvocationErrorKind::UnsupportedOperation);
        assert_eq!(err.to_string(), "Unsupported math operation 'divide'");
    }
}
