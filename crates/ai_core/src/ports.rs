//! Port definitions for the inference server
//!
//! Defines the trait that inference server clients implement.

use async_trait::async_trait;
use domain::{ChatTurn, ModelName, ServerStatus, Temperature};
use serde::{Deserialize, Serialize};

use crate::{error::InferenceError, transcript::build_transcript};

/// One non-streaming generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model that should produce the continuation
    pub model: ModelName,
    /// Flat transcript ending in the assistant cue
    pub prompt: String,
    /// Sampling temperature
    pub temperature: Temperature,
}

impl GenerateRequest {
    /// Build a request from a conversation history
    pub fn from_turns(turns: &[ChatTurn], model: ModelName, temperature: Temperature) -> Self {
        Self {
            model,
            prompt: build_transcript(turns),
            temperature,
        }
    }
}

/// Port for inference server implementations
#[async_trait]
pub trait InferenceServer: Send + Sync {
    /// Probe liveness and installed models
    ///
    /// Never fails: any failure is reported as an unreachable status.
    async fn probe(&self) -> ServerStatus;

    /// Generate a complete response (non-streaming)
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError>;

    /// Base URL of the server
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llama() -> ModelName {
        ModelName::new("llama2").unwrap()
    }

    #[test]
    fn request_from_turns_builds_transcript() {
        let turns = [ChatTurn::user("hi")];
        let req = GenerateRequest::from_turns(&turns, llama(), Temperature::default());
        assert_eq!(req.prompt, "User: hi\nAssistant: ");
        assert_eq!(req.model.as_str(), "llama2");
    }

    #[test]
    fn request_keeps_temperature() {
        let temperature = Temperature::new(0.2).unwrap();
        let req = GenerateRequest::from_turns(&[ChatTurn::user("Test")], llama(), temperature);
        assert_eq!(req.temperature, temperature);
    }

    #[test]
    fn trait_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn InferenceServer>();
    }
}
