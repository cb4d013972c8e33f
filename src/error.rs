use thiserror::Error;

/// Structured error context for configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "base_uri", "RAGCHAT_LOGIN_MODE")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected format, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "config_env")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified failure surface of the client.
///
/// `Remote` and `Application` are the two classified channels of a buffered
/// call and are never merged: the first means the backend rejected the call
/// at the HTTP level, the second means it accepted the call but reported a
/// domain error inside a 2xx payload.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    Remote {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("{message}")]
    Application { message: String },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Human-readable message, suitable for showing to an end user.
    pub fn message(&self) -> String {
        match self {
            Error::Remote { message, .. } | Error::Application { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status carried by the failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_application(&self) -> bool {
        matches!(self, Error::Application { .. })
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
