//! Server-side chat history sessions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySession {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entra_oid: Option<String>,
    #[serde(default)]
    pub title: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

/// One page of `GET /chat_history/sessions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryListResponse {
    #[serde(default)]
    pub sessions: Vec<HistorySession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// `GET /chat_history/sessions/{id}`: question/response pairs in turn order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entra_oid: Option<String>,
    #[serde(default)]
    pub answers: Vec<(String, serde_json::Value)>,
}
