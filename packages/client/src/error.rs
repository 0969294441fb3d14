//! Error taxonomy for backend calls.
//!
//! Every remote failure surfaces as a [`ClientError`]. Nothing here is fatal:
//! callers report the failure (the UI shows a toast) and leave their local
//! state unchanged. There are no retries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (network, TLS, request build).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// Sign-in or sign-up was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A session exists but no profile row was found for the user.
    #[error("no profile found for user {0}")]
    MissingProfile(String),

    /// A note has no stored file to download.
    #[error("file not available for download")]
    FileUnavailable,

    /// The backend's response could not be decoded into the expected shape.
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
