//! Error types for profile API calls.

use thiserror::Error;

/// Errors that can occur while talking to the profile backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, TLS, timeout or request-building failure
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("Server returned status {status}{}", message_suffix(.message))]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` field from the response body, if the server sent one
        message: Option<String>,
    },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Declared content type of an upload is not a valid MIME string
    #[error("Invalid content type '{0}'")]
    InvalidContentType(String),
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.trim().is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}

impl ApiError {
    /// Human-readable message provided by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// HTTP status code, when the failure came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build a status error from a raw response body.
    pub(crate) fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<crate::model::ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        Self::Status { status, message }
    }
}
