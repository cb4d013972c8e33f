//! Wire types shared with the backend.

pub mod history;
pub mod message;
pub mod request;
pub mod response;
pub mod server;

pub use history::{HistoryListResponse, HistoryResponse, HistorySession};
pub use message::{ChatMessage, MessageRole};
pub use request::{
    Approach, ChatAppRequest, RequestContext, RequestOverrides, RetrievalMode, SemanticKernelMode,
};
pub use response::{ChatAppResponse, ResponseChoice, ResponseContext, SimpleApiResponse};
pub use server::{AuthSetup, ServerConfig, SpeechAudio};
