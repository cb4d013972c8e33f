//! Conversation messages exchanged with the backend.

use serde::{Deserialize, Serialize};

/// One turn of a conversation. A `Vec<ChatMessage>` is ordered chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: text.into(),
        }
    }
}

/// Message role. Some backends emit upper-case roles in streamed deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    #[serde(alias = "SYSTEM")]
    System,
    #[serde(alias = "USER")]
    User,
    #[serde(alias = "ASSISTANT")]
    Assistant,
}
