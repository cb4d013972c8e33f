//! Mock backend setup for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use ragchat_client::{LoginMode, RagClient, StreamRoute};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TOKEN: &str = "test-id-token";

/// Test fixture that manages a mock server mounted under `/api`
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_uri: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_uri = format!("{}/api", server.url());
        Self {
            server: Arc::new(Mutex::new(server)),
            base_uri,
        }
    }

    /// Client pointed at the mock server
    pub fn client(&self, login_mode: LoginMode) -> RagClient {
        self.client_with_route(login_mode, StreamRoute::Accept)
    }

    pub fn client_with_route(&self, login_mode: LoginMode, route: StreamRoute) -> RagClient {
        RagClient::builder()
            .base_uri(&self.base_uri)
            .login_mode(login_mode)
            .stream_route(route)
            .build()
            .expect("client builds against mock server")
    }

    /// Unconfigured mock; chain matchers and responses, then `create_async()`
    pub async fn mock(&self, method: &str, path: impl Into<Matcher>) -> Mock {
        let mut server = self.server.lock().await;
        server.mock(method, path)
    }

    /// JSON response with the given status
    pub async fn mock_json(&self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.mock(method, path)
            .await
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn bearer() -> String {
    format!("Bearer {}", TOKEN)
}
