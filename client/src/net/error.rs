//! Error type for REST calls against the backend.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures collapse to one generic user-facing message, while
//! structured backend error payloads are surfaced verbatim so the user sees
//! exactly what the backend rejected.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message shown for any transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Unable to reach the server. Please try again.";

/// Errors produced by backend API calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// The response body did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The call was attempted outside the browser (server render).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build a `Server` error from a status and raw body text.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Server { status, message: error_message_from_body(body) }
    }

    /// Text suitable for showing next to the action that failed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::Server { message: Some(message), .. } => message.clone(),
            Self::Server { status, message: None } => format!("Request failed (status {status})"),
            Self::Decode(_) => "Unexpected response from the server.".to_owned(),
            Self::Unavailable => "This action is only available in the browser.".to_owned(),
        }
    }
}

/// Extract `error` / `message` / `detail` from a JSON error body.
#[must_use]
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message", "detail"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}
