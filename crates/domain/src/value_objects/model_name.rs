//! Model identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Tag the server assigns to models pulled without an explicit tag
const IMPLICIT_TAG: &str = "latest";

/// Identifier of a model served by the inference server, e.g. `llama2` or `phi:2.7b`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelName(String);

impl ModelName {
    /// Create a model name with validation
    ///
    /// The name must be non-empty and must not contain whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidModelName(name));
        }
        Ok(Self(name))
    }

    /// Borrow the name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name without the `:tag` suffix
    #[must_use]
    pub fn base(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(base, _)| base)
    }

    /// Explicit tag, if any
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, tag)| tag)
    }

    /// Whether an installed model name reported by the server satisfies this name
    ///
    /// Exact matches always count. An untagged name also matches its
    /// `:latest` variant.
    #[must_use]
    pub fn matches_installed(&self, installed: &str) -> bool {
        if installed == self.0 {
            return true;
        }
        self.tag().is_none()
            && installed
                .split_once(':')
                .is_some_and(|(base, tag)| base == self.0 && tag == IMPLICIT_TAG)
    }
}

impl TryFrom<String> for ModelName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelName> for String {
    fn from(name: ModelName) -> Self {
        name.0
    }
}

impl std::str::FromStr for ModelName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
