//! Buffered ask/chat responses.

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thoughts: Option<String>,
    #[serde(default)]
    pub data_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followup_questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub context: ResponseContext,
    /// Opaque value the caller sends back on the next turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_state: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatAppResponse {
    #[serde(default)]
    pub choices: Vec<ResponseChoice>,
}

impl ChatAppResponse {
    /// Content of the first choice, if any.
    pub fn answer(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Body returned by upload and delete-upload calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
