//! Server config, login setup, citations, speech and user uploads.

use super::core::RagClient;
use crate::auth::AuthToken;
use crate::protocol::Operation;
use crate::types::{AuthSetup, ServerConfig, SimpleApiResponse, SpeechAudio};
use crate::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{error, info};

const DEFAULT_AUDIO_TYPE: &str = "audio/mpeg";

/// A file to send to `POST /upload` as the `file` form part.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn into_form(self) -> Result<reqwest::multipart::Form> {
        let mut part = reqwest::multipart::Part::bytes(self.data).file_name(self.file_name);
        if let Some(mime) = &self.mime_type {
            part = part
                .mime_str(mime)
                .map_err(|e| Error::configuration(format!("Invalid mime '{}': {}", mime, e)))?;
        }
        Ok(reqwest::multipart::Form::new().part("file", part))
    }
}

impl RagClient {
    /// Backend feature flags (`GET /config`).
    pub async fn get_config(&self) -> Result<ServerConfig> {
        let envelope = self.envelope(Operation::GetConfig, None).build();
        self.execute_json(envelope).await
    }

    /// Backend login configuration (`GET /auth_setup`).
    pub async fn get_auth_setup(&self) -> Result<AuthSetup> {
        let envelope = self.envelope(Operation::GetAuthSetup, None).build();
        self.execute_json(envelope).await
    }

    /// Link to a cited source document. No request is made.
    pub fn citation_file_path(&self, citation: &str) -> String {
        self.router.citation_path(citation)
    }

    /// Synthesize `text` (`POST /speech`).
    ///
    /// `Ok(None)` when the backend has speech output disabled (400) or fails
    /// to synthesize (any other non-200); only network failures are errors.
    pub async fn get_speech(&self, text: &str) -> Result<Option<SpeechAudio>> {
        let envelope = self
            .envelope(Operation::Speech, None)
            .json(&json!({ "text": text }))?
            .build();
        let resp = self.transport.send(envelope).await?;

        match resp.status() {
            StatusCode::OK => {
                let content_type = resp
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or(DEFAULT_AUDIO_TYPE)
                    .to_string();
                let data = resp
                    .bytes()
                    .await
                    .map_err(crate::transport::TransportError::Http)?;
                Ok(Some(SpeechAudio { data, content_type }))
            }
            StatusCode::BAD_REQUEST => {
                info!(operation = "speech", "speech synthesis is not enabled");
                Ok(None)
            }
            status => {
                error!(
                    operation = "speech",
                    http_status = status.as_u16(),
                    "unable to get speech synthesis"
                );
                Ok(None)
            }
        }
    }

    /// Upload a caller-built multipart form (`POST /upload`).
    pub async fn upload_form(
        &self,
        form: reqwest::multipart::Form,
        token: Option<&AuthToken>,
    ) -> Result<SimpleApiResponse> {
        let envelope = self
            .envelope(Operation::UploadFile, token)
            .multipart(form)
            .build();
        self.execute_json(envelope).await
    }

    /// Upload one file as the `file` form part.
    pub async fn upload_file(
        &self,
        file: UploadFile,
        token: Option<&AuthToken>,
    ) -> Result<SimpleApiResponse> {
        self.upload_form(file.into_form()?, token).await
    }

    /// `POST /delete_uploaded` with `{"filename": ...}`.
    pub async fn delete_uploaded_file(
        &self,
        filename: &str,
        token: Option<&AuthToken>,
    ) -> Result<SimpleApiResponse> {
        let envelope = self
            .envelope(Operation::DeleteUploadedFile, token)
            .json(&json!({ "filename": filename }))?
            .build();
        self.execute_json(envelope).await
    }

    /// File names uploaded by the current user, in backend order.
    pub async fn list_uploaded_files(&self, token: Option<&AuthToken>) -> Result<Vec<String>> {
        let envelope = self.envelope(Operation::ListUploadedFiles, token).build();
        self.execute_json(envelope).await
    }
}
