//! reqwest-backed `ChatService` talking JSON over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use super::backend::{ChatService, ServiceError};
use super::types::{InitResponse, ProcessRequest, ProcessResponse};

pub struct HttpChatService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatService {
    /// Build a client for the service at `base_url` (e.g. `http://localhost:8000`).
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ServiceError::Config("base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/removesession/{id}` with the id as one percent-encoded path segment.
    fn remove_session_url(&self, session_id: &str) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.url("/removesession"))
            .map_err(|e| ServiceError::Config(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::Config(format!("base URL cannot carry a path: {}", self.base_url)))?
            .push(session_id);
        Ok(url)
    }
}

/// Map a non-success status to `ServiceError::Api`, keeping the body for the log.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Chat service error: {} - {}", status, message);
    Err(ServiceError::Api { status, message })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Network(e.to_string()))?;
    debug!("Chat service response body: {} bytes", body.len());
    serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))
}

#[async_trait]
impl ChatService for HttpChatService {
    fn name(&self) -> &str {
        "http"
    }

    async fn init_session(&self) -> Result<InitResponse, ServiceError> {
        info!("GET {}/init", self.base_url);
        let response = self
            .client
            .get(self.url("/init"))
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        read_json(response).await
    }

    async fn process_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ProcessResponse, ServiceError> {
        let body = ProcessRequest {
            session_id: session_id.map(str::to_string),
            message: message.to_string(),
        };
        info!(
            "POST {}/process: session={:?}, message_len={}",
            self.base_url,
            body.session_id,
            body.message.len()
        );

        let response = self
            .client
            .post(self.url("/process"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let response = check_status(response).await?;
        read_json(response).await
    }

    async fn remove_session(&self, session_id: &str) -> Result<(), ServiceError> {
        let url = self.remove_session_url(session_id)?;
        info!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}
