//! Inference server status and readiness

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::ModelName;

/// Result of one probe against the inference server
///
/// Produced fresh by every probe and never mutated. The constructors
/// guarantee that an unreachable status carries no models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    reachable: bool,
    available_models: Vec<String>,
}

impl ServerStatus {
    /// Status of a server that could not be reached
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            available_models: Vec::new(),
        }
    }

    /// Status of a reachable server with its installed models, in server order
    pub const fn reachable(available_models: Vec<String>) -> Self {
        Self {
            reachable: true,
            available_models,
        }
    }

    /// Whether the server answered the probe
    pub const fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// Installed models as reported by the server
    pub fn available_models(&self) -> &[String] {
        &self.available_models
    }

    /// Whether `model` is among the installed models
    pub fn has_model(&self, model: &ModelName) -> bool {
        self.available_models
            .iter()
            .any(|installed| model.matches_installed(installed))
    }

    /// Readiness of the server for serving `model`
    pub fn readiness_for(&self, model: &ModelName) -> Readiness {
        if !self.reachable {
            Readiness::Unreachable
        } else if self.has_model(model) {
            Readiness::ReachableReady
        } else {
            Readiness::ReachableNoModel
        }
    }
}

/// Supervisor state for one requested model
///
/// ```text
/// Unknown --probe--> Unreachable --launch+probe--> ReachableNoModel --fetch--> ReachableReady
/// Unknown --probe--> ReachableNoModel | ReachableReady
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    /// No probe has run yet
    #[default]
    Unknown,
    /// The server did not answer
    Unreachable,
    /// The server answered but the requested model is not installed
    ReachableNoModel,
    /// The server answered and the requested model is installed
    ReachableReady,
}

impl Readiness {
    /// Whether the server answered the last probe
    pub const fn is_reachable(self) -> bool {
        matches!(self, Self::ReachableNoModel | Self::ReachableReady)
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "unknown",
            Self::Unreachable => "not running",
            Self::ReachableNoModel => "running, model missing",
            Self::ReachableReady => "ready",
        };
        f.write_str(label)
    }
}
