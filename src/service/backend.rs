use std::fmt;

use async_trait::async_trait;

use super::types::{InitResponse, ProcessResponse};

/// Errors that can occur while talking to the chat service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Client misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Service returned a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "config error: {msg}"),
            ServiceError::Network(msg) => write!(f, "network error: {msg}"),
            ServiceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ServiceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// The three calls the widget makes against the chat service.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Returns the name of the backend (for logging).
    fn name(&self) -> &str;

    /// `GET /init`: create a session and fetch the greeting.
    async fn init_session(&self) -> Result<InitResponse, ServiceError>;

    /// `POST /process`: send one user message and wait for the reply.
    async fn process_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ProcessResponse, ServiceError>;

    /// `DELETE /removesession/{id}`: drop the session server-side.
    async fn remove_session(&self, session_id: &str) -> Result<(), ServiceError>;
}
