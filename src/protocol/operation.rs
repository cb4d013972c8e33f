//! Logical backend operations and their fixed request shape.

use reqwest::Method;

/// Whether an operation carries the caller's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Never sends an authorization header.
    None,
    /// Sends one when login is enabled and a token is supplied.
    Conditional,
    /// The caller must supply a token; login mode still decides whether it is sent.
    Required,
}

/// How the request body is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// No content-type header.
    None,
    /// `Content-Type: application/json`.
    Json,
    /// Multipart form; the transport writes the boundary-bearing content-type.
    Multipart,
}

/// Every call the client can make, with its path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetConfig,
    GetAuthSetup,
    Ask,
    Chat,
    Speech,
    UploadFile,
    DeleteUploadedFile,
    ListUploadedFiles,
    PostChatHistory,
    ListChatHistory {
        count: u32,
        continuation_token: Option<String>,
    },
    GetChatHistory {
        id: String,
    },
    DeleteChatHistory {
        id: String,
    },
}

impl Operation {
    pub fn method(&self) -> Method {
        match self {
            Operation::GetConfig
            | Operation::GetAuthSetup
            | Operation::ListUploadedFiles
            | Operation::ListChatHistory { .. }
            | Operation::GetChatHistory { .. } => Method::GET,
            Operation::DeleteChatHistory { .. } => Method::DELETE,
            Operation::Ask
            | Operation::Chat
            | Operation::Speech
            | Operation::UploadFile
            | Operation::DeleteUploadedFile
            | Operation::PostChatHistory => Method::POST,
        }
    }

    pub fn auth_policy(&self) -> AuthPolicy {
        match self {
            Operation::GetConfig | Operation::GetAuthSetup | Operation::Speech => AuthPolicy::None,
            Operation::Ask
            | Operation::Chat
            | Operation::UploadFile
            | Operation::DeleteUploadedFile
            | Operation::ListUploadedFiles => AuthPolicy::Conditional,
            Operation::PostChatHistory
            | Operation::ListChatHistory { .. }
            | Operation::GetChatHistory { .. }
            | Operation::DeleteChatHistory { .. } => AuthPolicy::Required,
        }
    }

    /// History calls declare JSON even when they send no body.
    pub fn content_kind(&self) -> ContentKind {
        match self {
            Operation::GetConfig | Operation::GetAuthSetup | Operation::ListUploadedFiles => {
                ContentKind::None
            }
            Operation::UploadFile => ContentKind::Multipart,
            _ => ContentKind::Json,
        }
    }

    /// Stable label used in logs and failure messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetConfig => "get_config",
            Operation::GetAuthSetup => "get_auth_setup",
            Operation::Ask => "ask",
            Operation::Chat => "chat",
            Operation::Speech => "speech",
            Operation::UploadFile => "upload_file",
            Operation::DeleteUploadedFile => "delete_uploaded_file",
            Operation::ListUploadedFiles => "list_uploaded_files",
            Operation::PostChatHistory => "post_chat_history",
            Operation::ListChatHistory { .. } => "list_chat_history",
            Operation::GetChatHistory { .. } => "get_chat_history",
            Operation::DeleteChatHistory { .. } => "delete_chat_history",
        }
    }
}
