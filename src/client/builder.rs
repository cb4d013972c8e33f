use crate::client::core::RagClient;
use crate::config::{ClientConfig, LoginMode, StreamRoute};
use crate::protocol::EndpointRouter;
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`RagClient`].
pub struct RagClientBuilder {
    config: ClientConfig,
    http_client: Option<reqwest::Client>,
}

impl RagClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            http_client: None,
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: None,
        }
    }

    /// Start from `RAGCHAT_*` environment variables (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Absolute URI every endpoint path is appended to, e.g. `https://host/api`.
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.base_uri = uri.into();
        self
    }

    pub fn login_mode(mut self, mode: LoginMode) -> Self {
        self.config.login_mode = mode;
        self
    }

    pub fn stream_route(mut self, route: StreamRoute) -> Self {
        self.config.stream_route = route;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn history_page_size(mut self, n: u32) -> Self {
        self.config.history_page_size = n.max(1);
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(url.into());
        self
    }

    /// Use a caller-built `reqwest::Client`. Proxy and pool settings are then
    /// ignored; the timeout still bounds buffered calls.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<RagClient> {
        self.config.validate()?;

        let transport = match self.http_client {
            Some(client) => {
                HttpTransport::with_client(client).request_timeout(self.config.timeout)
            }
            None => HttpTransport::new(&self.config)?,
        };
        let router = EndpointRouter::new(&self.config.base_uri, self.config.stream_route);

        tracing::debug!(
            base_uri = router.base_uri(),
            login_mode = ?self.config.login_mode,
            stream_route = ?self.config.stream_route,
            "ragchat client configured"
        );

        Ok(RagClient {
            config: Arc::new(self.config),
            router,
            transport: Arc::new(transport),
        })
    }
}

impl Default for RagClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
