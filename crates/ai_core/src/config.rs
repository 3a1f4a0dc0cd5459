//! Configuration for the inference client

use domain::{DomainError, ModelName, Temperature};
use serde::{Deserialize, Serialize};

/// Configuration for the inference client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model selected when a session starts
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sampling temperature selected when a session starts (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Time bound for the status probe in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Time bound for one generation request in milliseconds
    #[serde(default = "default_generate_timeout_ms")]
    pub generate_timeout_ms: u64,

    /// Models offered for selection
    #[serde(default = "default_models")]
    pub models: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama2".to_string()
}

const fn default_temperature() -> f32 {
    Temperature::DEFAULT
}

const fn default_probe_timeout_ms() -> u64 {
    5_000
}

const fn default_generate_timeout_ms() -> u64 {
    90_000
}

fn default_models() -> Vec<String> {
    ["llama2", "mistral", "phi", "gemma", "neural-chat", "tinyllama"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            temperature: default_temperature(),
            probe_timeout_ms: default_probe_timeout_ms(),
            generate_timeout_ms: default_generate_timeout_ms(),
            models: default_models(),
        }
    }
}

impl InferenceConfig {
    /// Validated default model
    pub fn default_model_name(&self) -> Result<ModelName, DomainError> {
        ModelName::new(self.default_model.clone())
    }

    /// Validated default temperature
    pub fn default_temperature(&self) -> Result<Temperature, DomainError> {
        Temperature::new(self.temperature)
    }

    /// Validated model catalogue
    pub fn model_catalogue(&self) -> Result<Vec<ModelName>, DomainError> {
        self.models.iter().cloned().map(ModelName::new).collect()
    }

    /// Check every field that has a constrained domain
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DomainError::ValidationError(format!(
                "inference.base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.models.is_empty() {
            return Err(DomainError::ValidationError(
                "inference.models must list at least one model".to_string(),
            ));
        }
        if self.probe_timeout_ms == 0 || self.generate_timeout_ms == 0 {
            return Err(DomainError::ValidationError(
                "inference timeouts must be greater than zero".to_string(),
            ));
        }
        self.default_model_name()?;
        self.default_temperature()?;
        self.model_catalogue()?;
        Ok(())
    }
}
