//! JSON bodies exchanged with the agent's `/chat` endpoint.
//!
//! The reply is decoded in two steps: first as plain JSON (failure is a
//! parse error), then into the typed shape (failure is a schema
//! violation). A reply that fails either step is never applied.

use serde::{Deserialize, Serialize};

use hcp_core::models::record::RecordPatch;

use crate::error::AgentError;

/// Assistant text used when the agent replies without a `response`.
pub const FALLBACK_REPLY: &str = "Action completed.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A validated agent reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub data: Option<RecordPatch>,
}

impl ChatReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            data: None,
        }
    }

    pub fn with_data(mut self, data: RecordPatch) -> Self {
        self.data = Some(data);
        self
    }

    /// Decode and validate a raw response body.
    pub fn decode(body: &[u8]) -> Result<Self, AgentError> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| AgentError::ResponseParse(e.to_string()))?;

        if !value.is_object() {
            return Err(AgentError::SchemaViolation(
                "reply body is not a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| AgentError::SchemaViolation(e.to_string()))
    }

    /// The assistant message to append.
    pub fn reply_text(&self) -> &str {
        self.response.as_deref().unwrap_or(FALLBACK_REPLY)
    }

    /// Record fields to merge, if the reply carries any. `null` and `{}`
    /// both mean "nothing to merge".
    pub fn record_patch(&self) -> Option<&RecordPatch> {
        self.data.as_ref().filter(|patch| !patch.is_empty())
    }
}
