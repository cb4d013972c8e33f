//! # ragchat-client
//!
//! Client protocol layer for a retrieval-augmented chat backend.
//!
//! ## Overview
//!
//! The crate builds typed requests for single-turn *ask* and multi-turn
//! *chat*, attaches a bearer token when login is enabled, and normalizes the
//! backend's two error channels into one failure surface:
//!
//! - **Transport failures**: non-2xx status, or a body that is not JSON
//!   ([`Error::Remote`]).
//! - **Application failures**: a 2xx response whose JSON payload carries an
//!   `error` field ([`Error::Application`]).
//!
//! Streamed chat is handed back as a live [`ChatStream`]; its NDJSON records
//! are framed into lines but never interpreted here.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use ragchat_client::{AuthToken, ChatAppRequest, ChatMessage, LoginMode, RagClient};
//!
//! #[tokio::main]
//! async fn main() -> ragchat_client::Result<()> {
//!     let client = RagClient::builder()
//!         .base_uri("https://rag.example.com/api")
//!         .login_mode(LoginMode::Enabled)
//!         .build()?;
//!     let token = AuthToken::new("id-token-from-your-login-flow");
//!
//!     let answer = client
//!         .ask(&ChatAppRequest::question("What does my plan cover?"), Some(&token))
//!         .await?;
//!     println!("{}", answer.answer().unwrap_or_default());
//!
//!     let history = vec![ChatMessage::user("And the deductible?")];
//!     let mut lines = client
//!         .chat_stream(ChatAppRequest::new(history), Some(&token))
//!         .await?
//!         .lines();
//!     while let Some(line) = lines.next().await {
//!         println!("{}", line?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Base URI, login mode, streaming route |
//! | [`auth`] | Bearer header resolution |
//! | [`protocol`] | Operations, URL routing, request envelopes, response classification |
//! | [`transport`] | HTTP execution |
//! | [`client`] | [`RagClient`] and its operations |
//! | [`types`] | Wire types |

pub mod auth;
pub mod client;
pub mod config;
pub mod protocol;
pub mod transport;
pub mod types;

pub use auth::{resolve_auth_headers, AuthToken};
pub use client::{ChatReply, ChatStream, RagClient, RagClientBuilder, UploadFile};
pub use config::{ClientConfig, LoginMode, StreamRoute};
pub use protocol::{ClassifiedResult, ResponseClassifier};
pub use types::{
    Approach, ChatAppRequest, ChatAppResponse, ChatMessage, MessageRole, RequestOverrides,
    RetrievalMode, SemanticKernelMode,
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream of `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

pub mod error;
pub use error::{Error, ErrorContext};
