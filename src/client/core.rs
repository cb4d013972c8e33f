use crate::auth::{resolve_auth_headers, AuthToken};
use crate::config::ClientConfig;
use crate::protocol::{
    AuthPolicy, ClassifiedResult, EndpointRouter, EnvelopeBuilder, Operation, RequestEnvelope,
    ResponseClassifier,
};
use crate::transport::HttpTransport;
use crate::Result;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Client for the RAG chat backend. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct RagClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) router: EndpointRouter,
    pub(crate) transport: Arc<HttpTransport>,
}

impl RagClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        crate::client::builder::RagClientBuilder::from_config(config).build()
    }

    /// Build a client from `RAGCHAT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        crate::client::builder::RagClientBuilder::from_env()?.build()
    }

    pub fn builder() -> crate::client::builder::RagClientBuilder {
        crate::client::builder::RagClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn router(&self) -> &EndpointRouter {
        &self.router
    }

    pub(crate) fn auth_headers(&self, operation: &Operation, token: Option<&AuthToken>) -> HeaderMap {
        match operation.auth_policy() {
            AuthPolicy::None => HeaderMap::new(),
            AuthPolicy::Conditional | AuthPolicy::Required => {
                resolve_auth_headers(self.config.login_mode, token)
            }
        }
    }

    /// Start an envelope for `operation` with auth already resolved.
    pub(crate) fn envelope(
        &self,
        operation: Operation,
        token: Option<&AuthToken>,
    ) -> EnvelopeBuilder<'_> {
        let auth = self.auth_headers(&operation, token);
        EnvelopeBuilder::new(&self.router, operation).auth_headers(auth)
    }

    /// Send a buffered request and classify the response.
    pub(crate) async fn execute(&self, envelope: RequestEnvelope) -> Result<ClassifiedResult<Value>> {
        let operation = envelope.operation.name();
        let client_request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let resp = self.transport.send(envelope).await?;
        let http_status = resp.status().as_u16();
        let classified = ResponseClassifier::classify_response(resp).await?;

        match &classified {
            ClassifiedResult::Success(_) => info!(
                operation,
                http_status,
                client_request_id = client_request_id.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                "ragchat request completed"
            ),
            ClassifiedResult::TransportError { message, .. } => warn!(
                operation,
                http_status,
                client_request_id = client_request_id.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                error = message.as_str(),
                "ragchat request failed"
            ),
            ClassifiedResult::ApplicationError { message } => warn!(
                operation,
                http_status,
                client_request_id = client_request_id.as_str(),
                error = message.as_str(),
                "ragchat backend reported an error in a successful response"
            ),
        }

        Ok(classified)
    }

    /// Send, classify and decode into `T`.
    pub(crate) async fn execute_json<T: DeserializeOwned>(&self, envelope: RequestEnvelope) -> Result<T> {
        self.execute(envelope).await?.decode()
    }
}
