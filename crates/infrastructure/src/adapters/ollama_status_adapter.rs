//! Status probe adapter - Implements StatusProbePort over an inference server

use std::sync::Arc;

use ai_core::InferenceServer;
use application::ports::StatusProbePort;
use async_trait::async_trait;
use domain::ServerStatus;
use tracing::{debug, instrument};

/// Adapter answering status probes from an Ollama server
pub struct OllamaStatusAdapter {
    server: Arc<dyn InferenceServer>,
}

impl std::fmt::Debug for OllamaStatusAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaStatusAdapter")
            .field("base_url", &self.server.base_url())
            .finish()
    }
}

impl OllamaStatusAdapter {
    /// Wrap an inference server
    pub fn new(server: Arc<dyn InferenceServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl StatusProbePort for OllamaStatusAdapter {
    #[instrument(skip(self), fields(base_url = %self.server.base_url()))]
    async fn probe(&self) -> ServerStatus {
        let status = self.server.probe().await;
        debug!(
            reachable = status.is_reachable(),
            models = status.available_models().len(),
            "Probed server"
        );
        status
    }
}
