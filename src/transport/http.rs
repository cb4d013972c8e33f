use super::TransportError;
use crate::config::ClientConfig;
use crate::protocol::{RequestBody, RequestEnvelope};
use crate::Result;
use reqwest::Proxy;
use std::time::{Duration, Instant};
use tracing::debug;

/// Executes [`RequestEnvelope`]s over a pooled `reqwest::Client`.
///
/// The request timeout bounds buffered calls end to end. Streamed calls only
/// get the connect timeout: a long answer must not be cut off mid-body.
pub struct HttpTransport {
    client: reqwest::Client,
    request_timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            // Streamed chat holds a connection open for the whole answer.
            .http2_adaptive_window(true)
            .http2_keep_alive_interval(Some(Duration::from_secs(30)))
            .http2_keep_alive_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                crate::Error::configuration(format!("invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            request_timeout: Some(config.timeout),
        })
    }

    /// Wrap an existing client (shared pools, custom TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            request_timeout: None,
        }
    }

    /// Timeout applied to each buffered request.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Send the envelope and return the response without reading its body.
    pub async fn send(&self, envelope: RequestEnvelope) -> Result<reqwest::Response> {
        let RequestEnvelope {
            operation,
            method,
            url,
            headers,
            body,
            streaming,
        } = envelope;

        let mut req = self.client.request(method.clone(), &url).headers(headers);
        if let Some(timeout) = self.request_timeout.filter(|_| !streaming) {
            req = req.timeout(timeout);
        }
        req = match body {
            RequestBody::Empty => req,
            RequestBody::Json(bytes) => req.body(bytes),
            RequestBody::Multipart(form) => req.multipart(form),
        };

        let start = Instant::now();
        let resp = req.send().await.map_err(TransportError::Http)?;

        debug!(
            operation = operation.name(),
            method = method.as_str(),
            http_status = resp.status().as_u16(),
            streaming,
            duration_ms = start.elapsed().as_millis() as u64,
            "ragchat response headers received"
        );
        Ok(resp)
    }
}
