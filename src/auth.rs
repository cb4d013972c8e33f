//! Bearer-token header resolution.
//!
//! Token acquisition and refresh live with the caller; this module only
//! decides whether an already-obtained token is attached to a request.

use crate::config::LoginMode;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

/// Opaque identity token supplied per call. Never logged, never persisted.
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    pub(crate) fn bearer_value(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Produce the authorization headers for a call.
///
/// Only `LoginMode::Enabled` with a token yields a header, and then exactly
/// one: `Authorization: Bearer <token>`. Every other combination yields an
/// empty map; a missing token is not an error here.
pub fn resolve_auth_headers(mode: LoginMode, token: Option<&AuthToken>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if !mode.attaches_bearer() {
        return headers;
    }
    let Some(token) = token else {
        return headers;
    };

    match HeaderValue::from_str(&token.bearer_value()) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Err(_) => {
            // Not representable as a header value; send the call unauthenticated.
            tracing::warn!("auth token contains characters not allowed in a header; omitting Authorization");
        }
    }
    headers
}
