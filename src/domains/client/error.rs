//! Client-side invocation errors.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a [`ToolInvocationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationErrorKind {
    MalformedEvent,
    InvocationRejected,
    TransportFailure,
    EmptyStream,
    MissingResult,
    UnsupportedOperation,
}

impl InvocationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedEvent => "malformed_event",
            Self::InvocationRejected => "invocation_rejected",
            Self::TransportFailure => "transport_failure",
            Self::EmptyStream => "empty_stream",
            Self::MissingResult => "missing_result",
            Self::UnsupportedOperation => "unsupported_operation",
        }
    }
}

impl fmt::Display for InvocationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way an invocation can fail to produce a [`ToolResponse`].
///
/// [`ToolResponse`]: super::ToolResponse
#[derive(Debug, Error)]
pub enum ToolInvocationError {
    /// A line of the event stream could not be decoded.
    #[error("Failed to decode event from tool '{tool}': {line}")]
    MalformedEvent {
        tool: String,
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with a non-success status instead of a stream.
    #[error("Tool '{tool}' returned status {status}: {body}")]
    InvocationRejected {
        tool: String,
        status: u16,
        body: String,
    },

    /// Connection, timeout or mid-stream I/O failure.
    #[error("HTTP error talking to tool '{tool}': {source}")]
    TransportFailure {
        tool: String,
        #[source]
        source: reqwest::Error,
    },

    /// The stream ended without a single event.
    #[error("Tool '{tool}' produced no events")]
    EmptyStream { tool: String },

    /// The last event carried no `result`.
    ///
    /// When that event was an `error` event, `reported` holds its message.
    #[error("Tool '{tool}' did not provide a result event{}", reported_suffix(.reported))]
    MissingResult {
        tool: String,
        reported: Option<String>,
    },

    /// A typed client was asked for an operation outside its closed set.
    #[error("Unsupported math operation '{0}'")]
    UnsupportedOperation(String),
}

fn reported_suffix(reported: &Option<String>) -> String {
    match reported {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

impl ToolInvocationError {
    pub fn kind(&self) -> InvocationErrorKind {
        match self {
            Self::MalformedEvent { .. } => InvocationErrorKind::MalformedEvent,
            Self::InvocationRejected { .. } => InvocationErrorKind::InvocationRejected,
            Self::TransportFailure { .. } => InvocationErrorKind::TransportFailure,
            Self::EmptyStream { .. } => InvocationErrorKind::EmptyStream,
            Self::MissingResult { .. } => InvocationErrorKind::MissingResult,
            Self::UnsupportedOperation(_) => InvocationErrorKind::UnsupportedOperation,
        }
    }

    pub(crate) fn transport(tool: &str, source: reqwest::Error) -> Self {
        Self::TransportFailure {
            tool: tool.to_string(),
            source,
        }
    }
}
