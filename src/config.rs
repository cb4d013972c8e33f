//! Client configuration: backend base URI, login mode and streaming route.
//!
//! A `ClientConfig` is built once (from code, environment or YAML) and is
//! immutable for the lifetime of the client that owns it.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URI: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_HISTORY_PAGE_SIZE: u32 = 10;

/// Whether the UI runs with user login, and how identity reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMode {
    /// No login: an authorization header is never attached.
    #[default]
    Disabled,
    /// Login with a client-held token, sent as a bearer credential.
    Enabled,
    /// Login handled by the hosting platform; identity travels with ambient
    /// credentials, so no bearer header is attached either.
    AppServices,
}

impl LoginMode {
    /// True when a caller-supplied token should be sent as `Authorization: Bearer`.
    pub fn attaches_bearer(&self) -> bool {
        matches!(self, LoginMode::Enabled)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "disabled" | "false" | "0" | "off" => Some(LoginMode::Disabled),
            "enabled" | "true" | "1" | "on" => Some(LoginMode::Enabled),
            "app_services" | "appservices" => Some(LoginMode::AppServices),
            _ => None,
        }
    }
}

/// Where streamed chat is requested from.
///
/// Backends disagree: some stream on `/chat` and pick the response shape from
/// the `Accept` header, others expose a separate `/chat/stream` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamRoute {
    /// Same `/chat` path, differentiated only by `Accept: application/x-ndjson`.
    #[default]
    Accept,
    /// `/chat/stream`.
    PathSuffix,
}

impl StreamRoute {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "accept" | "header" => Some(StreamRoute::Accept),
            "path_suffix" | "path" | "suffix" => Some(StreamRoute::PathSuffix),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute http(s) URI every endpoint path is appended to, e.g. `https://host/api`.
    pub base_uri: String,
    pub login_mode: LoginMode,
    pub stream_route: StreamRoute,
    /// Connect timeout for every call; also bounds buffered calls end to end.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Page size used by `list_chat_history` when the caller does not pass one.
    pub history_page_size: u32,
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            login_mode: LoginMode::default(),
            stream_route: StreamRoute::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
            proxy_url: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            ..Self::default()
        }
    }

    /// Read configuration from `RAGCHAT_*` environment variables.
    ///
    /// - `RAGCHAT_BACKEND_URI` (default `http://localhost:8080/api`)
    /// - `RAGCHAT_LOGIN_MODE`: `disabled` | `enabled` | `app_services`
    /// - `RAGCHAT_STREAM_ROUTE`: `accept` | `path_suffix`
    /// - `RAGCHAT_HTTP_TIMEOUT_SECS` (default 60)
    /// - `RAGCHAT_HISTORY_PAGE_SIZE` (default 10)
    /// - `RAGCHAT_PROXY_URL`
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();

        if let Ok(uri) = env::var("RAGCHAT_BACKEND_URI") {
            cfg.base_uri = uri;
        }
        if let Ok(raw) = env::var("RAGCHAT_LOGIN_MODE") {
            cfg.login_mode = LoginMode::parse(&raw).ok_or_else(|| {
                Error::configuration_with_context(
                    format!("unknown login mode '{}'", raw),
                    ErrorContext::new()
                        .with_field_path("RAGCHAT_LOGIN_MODE")
                        .with_details("expected disabled, enabled or app_services")
                        .with_source("config_env"),
                )
            })?;
        }
        if let Ok(raw) = env::var("RAGCHAT_STREAM_ROUTE") {
            cfg.stream_route = StreamRoute::parse(&raw).ok_or_else(|| {
                Error::configuration_with_context(
                    format!("unknown stream route '{}'", raw),
                    ErrorContext::new()
                        .with_field_path("RAGCHAT_STREAM_ROUTE")
                        .with_details("expected accept or path_suffix")
                        .with_source("config_env"),
                )
            })?;
        }
        if let Some(secs) = env::var("RAGCHAT_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            cfg.timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(n) = env::var("RAGCHAT_HISTORY_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
        {
            cfg.history_page_size = n.max(1);
        }
        cfg.proxy_url = env::var("RAGCHAT_PROXY_URL").ok().filter(|s| !s.is_empty());

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a YAML document using the same field names as the struct.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: ClientConfig = serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid YAML configuration: {}", e),
                ErrorContext::new().with_source("config_yaml"),
            )
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The base URI must be an absolute http or https URL.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.base_uri.trim()).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid backend base URI '{}'", self.base_uri),
                ErrorContext::new()
                    .with_field_path("base_uri")
                    .with_details(e.to_string()),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("unsupported scheme '{}' in backend base URI", parsed.scheme()),
                ErrorContext::new()
                    .with_field_path("base_uri")
                    .with_details("expected http or https"),
            ));
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
