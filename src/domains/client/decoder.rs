//! Line framing and reduction of an invocation's event stream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ToolInvocationError;
use crate::domains::tools::ToolEvent;

/// Outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    #[serde(rename = "tool")]
    pub tool_name: String,
    pub result: Value,
    pub events: Vec<ToolEvent>,
}

/// Splits a chunked byte stream into complete lines.
///
/// Chunks may cut lines anywhere, including inside a UTF-8 sequence; bytes
/// are buffered until a `\n` arrives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the non-empty lines it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(line) = Self::clean(&raw[..pos]) {
                lines.push(line);
            }
        }
        lines
    }

    /// Return the unterminated trailing line, if any.
    pub fn finish(self) -> Option<String> {
        Self::clean(&self.buffer)
    }

    fn clean(raw: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

/// Accumulates decoded events for one invocation.
#[derive(Debug)]
pub struct EventAccumulator {
    tool_name: String,
    events: Vec<ToolEvent>,
}

impl EventAccumulator {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            events: Vec::new(),
        }
    }

    /// Decode one line and append it.
    pub fn push_line(&mut self, line: &str) -> Result<(), ToolInvocationError> {
        let event =
            ToolEvent::from_line(line).map_err(|source| ToolInvocationError::MalformedEvent {
                tool: self.tool_name.clone(),
                line: line.to_string(),
                source,
            })?;
        self.events.push(event);
        Ok(())
    }

    /// Whether a `completed` or `error` event has been received.
    pub fn has_terminal(&self) -> bool {
        self.events.last().is_some_and(ToolEvent::is_terminal)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Reduce the accumulated sequence to a response.
    pub fn finish(self) -> Result<ToolResponse, ToolInvocationError> {
        reduce(self.tool_name, self.events)
    }
}

/// Reduce a complete event sequence to a [`ToolResponse`].
///
/// The last event decides: it must carry a `result` field. An `error`
/// event has none, so it fails the same way, with its message attached.
pub fn reduce(
    tool_name: impl Into<String>,
    events: Vec<ToolEvent>,
) -> Result<ToolResponse, ToolInvocationError> {
    let tool_name = tool_name.into();

    let Some(last) = events.last() else {
        return Err(ToolInvocationError::EmptyStream { tool: tool_name });
    };

    let Some(result) = last.result().cloned() else {
        return Err(ToolInvocationError::MissingResult {
            reported: last.error_message().map(str::to_string),
            tool: tool_name,
        });
    };

    Ok(ToolResponse {
        tool_name,
        result,
        events,
    })
}
