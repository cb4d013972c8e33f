//! Operation → URL mapping under the configured backend base URI.

use super::operation::Operation;
use crate::config::StreamRoute;

/// Joins fixed per-operation path templates onto the base URI.
///
/// Path parameters and continuation tokens are embedded verbatim; validating
/// identifiers is the caller's job.
#[derive(Debug, Clone)]
pub struct EndpointRouter {
    base_uri: String,
    stream_route: StreamRoute,
}

impl EndpointRouter {
    pub fn new(base_uri: impl Into<String>, stream_route: StreamRoute) -> Self {
        let base_uri = base_uri.into();
        Self {
            base_uri: base_uri.trim().trim_end_matches('/').to_string(),
            stream_route,
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn stream_route(&self) -> StreamRoute {
        self.stream_route
    }

    /// Path (with query) relative to the base URI.
    pub fn path(&self, operation: &Operation, streaming: bool) -> String {
        match operation {
            Operation::GetConfig => "/config".to_string(),
            Operation::GetAuthSetup => "/auth_setup".to_string(),
            Operation::Ask => "/ask".to_string(),
            Operation::Chat => match (streaming, self.stream_route) {
                (true, StreamRoute::PathSuffix) => "/chat/stream".to_string(),
                _ => "/chat".to_string(),
            },
            Operation::Speech => "/speech".to_string(),
            Operation::UploadFile => "/upload".to_string(),
            Operation::DeleteUploadedFile => "/delete_uploaded".to_string(),
            Operation::ListUploadedFiles => "/list_uploaded".to_string(),
            Operation::PostChatHistory => "/chat_history".to_string(),
            Operation::ListChatHistory {
                count,
                continuation_token,
            } => {
                let mut path = format!("/chat_history/sessions?count={}", count);
                if let Some(token) = continuation_token.as_deref().filter(|t| !t.is_empty()) {
                    path.push_str("&continuationToken=");
                    path.push_str(token);
                }
                path
            }
            Operation::GetChatHistory { id } | Operation::DeleteChatHistory { id } => {
                format!("/chat_history/sessions/{}", id)
            }
        }
    }

    pub fn url(&self, operation: &Operation, streaming: bool) -> String {
        format!("{}{}", self.base_uri, self.path(operation, streaming))
    }

    /// Link for a cited document. No request is made.
    pub fn citation_path(&self, citation: &str) -> String {
        format!("{}/content/{}", self.base_uri, citation)
    }
}
