//! Conversation-specific error types.

use thiserror::Error;

use crate::domains::client::{InvocationErrorKind, ToolInvocationError};

/// Errors surfaced by the conversation router.
///
/// An unmatched question is not an error; it produces the fallback reply.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// The request body failed validation; no tool was invoked.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The selected tool could not produce a result.
    #[error("{message}")]
    UpstreamFailure {
        kind: InvocationErrorKind,
        message: String,
    },
}

impl ConversationError {
    /// Create a new "invalid request" error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}

impl From<ToolInvocationError> for ConversationError {
    fn from(err: ToolInvocationError) -> Self {
        Self::UpstreamFailure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
