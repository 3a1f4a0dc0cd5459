//! Inference errors

use thiserror::Error;

/// Errors that can occur while talking to the inference server
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-success status code
    ///
    /// Rendered as `"{status}, {body}"` so both end up in user-facing text.
    #[error("{status}, {body}")]
    Status {
        /// Numeric HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded its time bound
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Client could not be built from the configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InferenceError {
    /// Classify a transport error, attributing timeouts to `timeout_ms`
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
