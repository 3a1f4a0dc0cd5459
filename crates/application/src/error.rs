//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External process could not be started
    #[error("Failed to spawn process: {0}")]
    ProcessSpawn(String),

    /// External process ran but did not succeed
    #[error("Process failed: {0}")]
    ProcessFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Whether the error came from an external process
    pub const fn is_process_error(&self) -> bool {
        matches!(self, Self::ProcessSpawn(_) | Self::ProcessFailed(_))
    }
}
