//! Ask and chat calls.

use super::core::RagClient;
use super::stream::ChatStream;
use crate::auth::AuthToken;
use crate::protocol::Operation;
use crate::types::{ChatAppRequest, ChatAppResponse};
use crate::Result;
use tracing::{info, warn};

/// Result of [`RagClient::chat_with`]: the response shape depends on the streaming flag.
#[derive(Debug)]
pub enum ChatReply {
    Buffered(ChatAppResponse),
    Streaming(ChatStream),
}

impl RagClient {
    /// Single-turn question answering (`POST /ask`).
    pub async fn ask(
        &self,
        request: &ChatAppRequest,
        token: Option<&AuthToken>,
    ) -> Result<ChatAppResponse> {
        let envelope = self.envelope(Operation::Ask, token).json(request)?.build();
        self.execute_json(envelope).await
    }

    /// Multi-turn chat with a buffered JSON answer (`POST /chat`).
    pub async fn chat(
        &self,
        mut request: ChatAppRequest,
        token: Option<&AuthToken>,
    ) -> Result<ChatAppResponse> {
        request.stream = false;
        let envelope = self
            .envelope(Operation::Chat, token)
            .streaming(false)
            .json(&request)?
            .build();
        self.execute_json(envelope).await
    }

    /// Multi-turn chat answered as an NDJSON stream.
    ///
    /// Returns as soon as response headers arrive. The response is not
    /// classified, whatever its status.
    pub async fn chat_stream(
        &self,
        mut request: ChatAppRequest,
        token: Option<&AuthToken>,
    ) -> Result<ChatStream> {
        request.stream = true;
        let envelope = self
            .envelope(Operation::Chat, token)
            .streaming(true)
            .json(&request)?
            .build();
        let url = envelope.url.clone();

        let resp = self.transport.send(envelope).await?;
        let status = resp.status();
        if status.is_success() {
            info!(
                operation = "chat",
                http_status = status.as_u16(),
                "ragchat stream opened"
            );
        } else {
            warn!(
                operation = "chat",
                http_status = status.as_u16(),
                url = url.as_str(),
                "ragchat stream opened with non-success status"
            );
        }
        Ok(ChatStream::new(resp))
    }

    /// Chat through either entry point, chosen at runtime.
    pub async fn chat_with(
        &self,
        request: ChatAppRequest,
        streaming: bool,
        token: Option<&AuthToken>,
    ) -> Result<ChatReply> {
        if streaming {
            Ok(ChatReply::Streaming(self.chat_stream(request, token).await?))
        } else {
            Ok(ChatReply::Buffered(self.chat(request, token).await?))
        }
    }
}
