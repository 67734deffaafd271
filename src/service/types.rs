//! JSON bodies exchanged with the chat service.

use serde::{Deserialize, Serialize};

/// Response from `GET /init`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InitResponse {
    pub session_id: String,
    /// Greeting shown as the panel's initial message.
    pub response: String,
}

/// Body of `POST /process`.
///
/// `session_id` serializes as `null` when the widget has no session
/// (init failed or never ran).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProcessRequest {
    pub session_id: Option<String>,
    pub message: String,
}

/// Response from `POST /process`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProcessResponse {
    pub response: String,
    /// The service echoes the session it used, minting a new one when the
    /// request carried an unknown or missing id.
    #[serde(default)]
    pub session_id: Option<String>,
}
