//! Server-side chat history. Every call carries the caller's token.

use super::core::RagClient;
use crate::auth::AuthToken;
use crate::protocol::Operation;
use crate::types::{HistoryListResponse, HistoryResponse};
use crate::Result;
use serde::Serialize;
use serde_json::Value;

impl RagClient {
    /// Store a conversation (`POST /chat_history`). The item shape is up to the caller.
    pub async fn post_chat_history<T: Serialize + ?Sized>(
        &self,
        item: &T,
        token: &AuthToken,
    ) -> Result<Value> {
        let envelope = self
            .envelope(Operation::PostChatHistory, Some(token))
            .json(item)?
            .build();
        self.execute(envelope).await?.into_result()
    }

    /// One page of sessions. `count` defaults to the configured page size;
    /// pass the previous page's `continuation_token` to continue.
    pub async fn list_chat_history(
        &self,
        count: Option<u32>,
        continuation_token: Option<&str>,
        token: &AuthToken,
    ) -> Result<HistoryListResponse> {
        let operation = Operation::ListChatHistory {
            count: count.unwrap_or(self.config.history_page_size),
            continuation_token: continuation_token.map(str::to_string),
        };
        let envelope = self.envelope(operation, Some(token)).build();
        self.execute_json(envelope).await
    }

    pub async fn get_chat_history(&self, id: &str, token: &AuthToken) -> Result<HistoryResponse> {
        let operation = Operation::GetChatHistory { id: id.to_string() };
        let envelope = self.envelope(operation, Some(token)).build();
        self.execute_json(envelope).await
    }

    /// Delete a session. Success carries no body.
    pub async fn delete_chat_history(&self, id: &str, token: &AuthToken) -> Result<()> {
        let operation = Operation::DeleteChatHistory { id: id.to_string() };
        let envelope = self.envelope(operation, Some(token)).build();
        self.execute(envelope).await?.into_result()?;
        Ok(())
    }
}
