//! HTTP execution of request envelopes.

mod http;

pub use http::HttpTransport;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            TransportError::Other(_) => None,
        }
    }
}
