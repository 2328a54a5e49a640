//! Crate-wide error type.
//!
//! Each domain keeps its own error enum; this one wraps them so startup code
//! and library callers can use a single `Result`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    #[error("Invocation error: {0}")]
    Invocation(#[from] crate::domains::client::ToolInvocationError),

    #[error("Conversation error: {0}")]
    Conversation(#[from] crate::domains::conversation::ConversationError),

    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Building an HTTP client for an upstream tool server failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::ToolInvocationError;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_domain_errors_convert() {
        let err: Error = ToolError::not_found("divide").into();
        assert!(matches!(err, Error::Tool(_)));
        assert_eq!(err.to_string(), "Tool error: Unknown tool 'divide'");

        let err: Error = ToolInvocationError::UnsupportedOperation("divide".into()).into();
        assert!(matches!(err, Error::Invocation(_)));
    }
}
