//! Response generation port

use std::fmt;

use async_trait::async_trait;
use domain::{Conversation, ModelName, Temperature};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Result of one generation call
///
/// Failures are not errors here: they carry the text shown to the
/// operator in place of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "text", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// The model produced a continuation
    Generated(String),
    /// The call failed; the text starts with `Error:`
    Failed(String),
}

impl GenerationOutcome {
    /// Build a failure outcome from any displayable reason
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed(format!("Error: {reason}"))
    }

    /// Text to display and append to history
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Failed(text) => text,
        }
    }

    /// Consume into the display text
    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) | Self::Failed(text) => text,
        }
    }

    /// Whether the call failed
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Port for generating the next assistant turn
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generate a continuation of `history` with `model`
    async fn generate(
        &self,
        history: &Conversation,
        model: &ModelName,
        temperature: Temperature,
    ) -> GenerationOutcome;
}
