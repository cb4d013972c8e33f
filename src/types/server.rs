//! Backend feature flags, login setup and speech output.

use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Feature flags from `GET /config`. Unknown flags are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(rename = "showGPT4VOptions")]
    pub show_gpt4v_options: bool,
    pub show_semantic_ranker_option: bool,
    pub show_query_rewriting_option: bool,
    pub show_reasoning_effort_option: bool,
    pub streaming_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_reasoning_effort: Option<String>,
    pub show_vector_option: bool,
    pub show_user_upload: bool,
    pub show_language_picker: bool,
    pub show_speech_input: bool,
    pub show_speech_output_browser: bool,
    pub show_speech_output_azure: bool,
    pub show_chat_history_browser: bool,
    pub show_chat_history_cosmos: bool,
}

/// Login configuration from `GET /auth_setup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthSetup {
    pub use_login: bool,
    pub require_access_control: bool,
    pub enable_unauthenticated_access: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msal_config: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_request: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_request: Option<serde_json::Value>,
}

/// Synthesized speech returned by `POST /speech`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub data: Bytes,
    pub content_type: String,
}

impl SpeechAudio {
    /// `data:` URL a player can load directly.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}
