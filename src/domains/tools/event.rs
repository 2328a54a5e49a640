//! Stream protocol events.
//!
//! Every invocation is narrated as a sequence of [`ToolEvent`]s, one JSON
//! object per line. The payload fields sit next to `status` on the wire:
//!
//! ```text
//! {"status":"started","tool":"add"}
//! {"status":"progress","message":"processing"}
//! {"status":"completed","result":{"total":5.0}}
//! ```

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Media type of an invocation response body.
pub const EVENT_STREAM_CONTENT_TYPE: &str = "application/x-ndjson";

/// Lifecycle state carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Started,
    Progress,
    Completed,
    Error,
}

impl EventStatus {
    /// Whether no further event may follow this one.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// One line of an invocation's progress narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEvent {
    pub status: EventStatus,

    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ToolEvent {
    fn with_field(status: EventStatus, key: &str, value: Value) -> Self {
        let mut payload = Map::new();
        payload.insert(key.to_string(), value);
        Self { status, payload }
    }

    /// The first event of every invocation.
    pub fn started(tool_name: &str) -> Self {
        Self::with_field(EventStatus::Started, "tool", Value::from(tool_name))
    }

    /// Advisory progress event.
    pub fn progress(message: &str) -> Self {
        Self::with_field(EventStatus::Progress, "message", Value::from(message))
    }

    /// Terminal event for a tool that returned normally.
    pub fn completed(result: Value) -> Self {
        Self::with_field(EventStatus::Completed, "result", result)
    }

    /// Terminal event for a tool that failed.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_field(EventStatus::Error, "error", Value::String(message.into()))
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The `result` field, if this event carries one.
    pub fn result(&self) -> Option<&Value> {
        self.payload.get("result")
    }

    /// The `error` string of an error event.
    pub fn error_message(&self) -> Option<&str> {
        self.payload.get("error").and_then(Value::as_str)
    }

    /// Encode as a single newline-terminated JSON line.
    pub fn to_line(&self) -> Result<Bytes, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(Bytes::from(line))
    }

    /// Decode one line (without its terminator).
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
