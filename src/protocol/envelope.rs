//! Outgoing request envelopes.

use super::endpoint::EndpointRouter;
use super::operation::{ContentKind, Operation};
use crate::Result;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_NDJSON: &str = "application/x-ndjson";

#[derive(Debug)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON payload.
    Json(Bytes),
    /// Caller-built multipart form, passed through untouched.
    Multipart(reqwest::multipart::Form),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

/// A fully composed request, built fresh for every call and consumed by the transport.
#[derive(Debug)]
pub struct RequestEnvelope {
    pub operation: Operation,
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub streaming: bool,
}

/// Builder for [`RequestEnvelope`].
pub struct EnvelopeBuilder<'a> {
    router: &'a EndpointRouter,
    operation: Operation,
    streaming: bool,
    auth: HeaderMap,
    body: RequestBody,
}

impl<'a> EnvelopeBuilder<'a> {
    pub fn new(router: &'a EndpointRouter, operation: Operation) -> Self {
        Self {
            router,
            operation,
            streaming: false,
            auth: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Request an incremental NDJSON response. Only meaningful for chat.
    pub fn streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Headers produced by [`crate::auth::resolve_auth_headers`].
    pub fn auth_headers(mut self, headers: HeaderMap) -> Self {
        self.auth = headers;
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        self.body = RequestBody::Json(Bytes::from(serde_json::to_vec(payload)?));
        Ok(self)
    }

    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn build(self) -> RequestEnvelope {
        let mut headers = HeaderMap::new();

        // Multipart leaves content-type to the transport so it can write the boundary.
        let declare_json = match &self.body {
            RequestBody::Json(_) => true,
            RequestBody::Multipart(_) => false,
            RequestBody::Empty => self.operation.content_kind() == ContentKind::Json,
        };
        if declare_json {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        if self.operation == Operation::Chat {
            let accept = if self.streaming {
                APPLICATION_NDJSON
            } else {
                APPLICATION_JSON
            };
            headers.insert(ACCEPT, HeaderValue::from_static(accept));
        }

        // insert, not append: a key appears at most once.
        for (name, value) in self.auth.iter() {
            headers.insert(name.clone(), value.clone());
        }

        RequestEnvelope {
            method: self.operation.method(),
            url: self.router.url(&self.operation, self.streaming),
            operation: self.operation,
            headers,
            body: self.body,
            streaming: self.streaming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{resolve_auth_headers, AuthToken};
    use crate::config::{LoginMode, StreamRoute};
    use crate::types::ChatAppRequest;
    use reqwest::header::AUTHORIZATION;

    fn router() -> EndpointRouter {
        EndpointRouter::new("http://localhost:8080/api", StreamRoute::Accept)
    }

    #[test]
    fn json_operation_declares_content_type_and_merges_auth() {
        let router = router();
        let auth = resolve_auth_headers(LoginMode::Enabled, Some(&AuthToken::new("t0k")));
        let env = EnvelopeBuilder::new(&router, Operation::Ask)
            .auth_headers(auth)
            .json(&ChatAppRequest::question("hi"))
            .unwrap()
            .build();

        assert_eq!(env.method, Method::POST);
        assert_eq!(env.url, "http://localhost:8080/api/ask");
        assert_eq!(env.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap(), APPLICATION_JSON);
        assert_eq!(env.headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert!(env.headers.get(ACCEPT).is_none());
        match env.body {
            RequestBody::Json(bytes) => {
                let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                assert_eq!(v["messages"][0]["content"], "hi");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn chat_accept_header_tracks_streaming_flag() {
        let router = router();
        let streaming = EnvelopeBuilder::new(&router, Operation::Chat)
            .streaming(true)
            .json(&ChatAppRequest::default())
            .unwrap()
            .build();
        assert_eq!(
            streaming.headers.get(ACCEPT).unwrap().to_str().unwrap(),
            APPLICATION_NDJSON
        );

        let buffered = EnvelopeBuilder::new(&router, Operation::Chat)
            .json(&ChatAppRequest::default())
            .unwrap()
            .build();
        assert_eq!(
            buffered.headers.get(ACCEPT).unwrap().to_str().unwrap(),
            APPLICATION_JSON
        );
    }

    #[test]
    fn multipart_upload_gets_no_content_type_override() {
        let router = router();
        let form = reqwest::multipart::Form::new().text("note", "x");
        let auth = resolve_auth_headers(LoginMode::Enabled, Some(&AuthToken::new("t0k")));
        let env = EnvelopeBuilder::new(&router, Operation::UploadFile)
            .auth_headers(auth)
            .multipart(form)
            .build();
        assert!(env.headers.get(CONTENT_TYPE).is_none());
        assert!(env.headers.get(AUTHORIZATION).is_some());
        assert!(matches!(env.body, RequestBody::Multipart(_)));
    }

    #[test]
    fn bodyless_get_without_login_has_no_headers() {
        let router = router();
        let env = EnvelopeBuilder::new(&router, Operation::GetConfig)
            .auth_headers(resolve_auth_headers(LoginMode::Disabled, Some(&AuthToken::new("x"))))
            .build();
        assert!(env.headers.is_empty());
        assert!(env.body.is_empty());
        assert_eq!(env.method, Method::GET);
    }

    #[test]
    fn history_delete_declares_json_without_body() {
        let router = router();
        let env = EnvelopeBuilder::new(&router, Operation::DeleteChatHistory { id: "s9".into() })
            .build();
        assert_eq!(env.method, Method::DELETE);
        assert_eq!(env.url, "http://localhost:8080/api/chat_history/sessions/s9");
        assert_eq!(env.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap(), APPLICATION_JSON);
    }

    #[test]
    fn auth_header_is_never_duplicated() {
        let router = router();
        let mut auth = HeaderMap::new();
        auth.insert(AUTHORIZATION, HeaderValue::from_static("Bearer a"));
        let env = EnvelopeBuilder::new(&router, Operation::Ask)
            .auth_headers(auth.clone())
            .auth_headers(auth)
            .build();
        assert_eq!(env.headers.get_all(AUTHORIZATION).iter().count(), 1);
    }
}
