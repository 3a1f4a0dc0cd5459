//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Temperature outside the closed range [0, 1]
    #[error("Invalid temperature: {0} (expected a value between 0.0 and 1.0)")]
    InvalidTemperature(f32),

    /// Model identifier is empty or contains whitespace
    #[error("Invalid model name: {0:?}")]
    InvalidModelName(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
