//! API Error Types
//!
//! Errors returned by calls to the todo backend. Callers in the view layer
//! log and swallow them, nothing here is shown to the user.

use thiserror::Error;

/// Errors that can occur when talking to the todo backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, reset, body read)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// A 2xx body did not have the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for network-level failures, false for protocol failures
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// HTTP status of a protocol failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;
