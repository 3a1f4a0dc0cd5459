//! Generation adapter - Implements GenerationPort over an inference server

use std::sync::Arc;

use ai_core::{GenerateRequest, InferenceServer};
use application::ports::{GenerationOutcome, GenerationPort};
use async_trait::async_trait;
use domain::{Conversation, ModelName, Temperature};
use tracing::{info, instrument, warn};

/// Adapter turning a conversation into one non-streaming generate call
pub struct OllamaGenerationAdapter {
    server: Arc<dyn InferenceServer>,
}

impl std::fmt::Debug for OllamaGenerationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaGenerationAdapter")
            .field("base_url", &self.server.base_url())
            .finish()
    }
}

impl OllamaGenerationAdapter {
    /// Wrap an inference server
    pub fn new(server: Arc<dyn InferenceServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl GenerationPort for OllamaGenerationAdapter {
    #[instrument(skip(self, history), fields(model = %model, turns = history.len()))]
    async fn generate(
        &self,
        history: &Conversation,
        model: &ModelName,
        temperature: Temperature,
    ) -> GenerationOutcome {
        let request = GenerateRequest::from_turns(history.turns(), model.clone(), temperature);

        match self.server.generate(&request).await {
            Ok(text) => {
                info!(response_len = text.len(), "Generated response");
                GenerationOutcome::Generated(text)
            },
            Err(e) => {
                warn!(error = %e, "Generation failed");
                GenerationOutcome::failed(e)
            },
        }
    }
}
