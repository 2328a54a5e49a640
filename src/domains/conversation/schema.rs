//! Request and response bodies of the conversation endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ConversationError;
use crate::domains::client::ToolResponse;
use crate::domains::tools::ToolEvent;

/// One conversation turn as sent by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRequest {
    pub question: String,
    pub interaction_id: String,
}

impl ConversationRequest {
    pub fn new(question: impl Into<String>, interaction_id: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            interaction_id: interaction_id.into(),
        }
    }

    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<(), ConversationError> {
        if self.question.is_empty() {
            return Err(ConversationError::invalid_request("question must not be empty"));
        }
        if self.interaction_id.is_empty() {
            return Err(ConversationError::invalid_request(
                "interaction_id must not be empty",
            ));
        }
        Ok(())
    }
}

/// Summary of the tool call behind a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallSummary {
    pub name: String,
    pub result: Value,
    pub events: Vec<ToolEvent>,
}

impl ToolCallSummary {
    pub fn from_response(name: impl Into<String>, response: ToolResponse) -> Self {
        Self {
            name: name.into(),
            result: response.result,
            events: response.events,
        }
    }
}

/// Reply to a conversation turn. `tool` is `null` when no tool was used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub interaction_id: String,
    pub question: String,
    pub reply: String,
    pub tool: Option<ToolCallSummary>,
}
