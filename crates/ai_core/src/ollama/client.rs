//! Ollama client implementation

use std::time::Duration;

use async_trait::async_trait;
use domain::ServerStatus;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{GenerateRequest, InferenceServer};

/// Text returned when the server omits the `response` field
const EMPTY_RESPONSE: &str = "No response generated";

/// Client for a local Ollama server
pub struct OllamaClient {
    client: Client,
    config: InferenceConfig,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.config.base_url)
            .field("probe_timeout_ms", &self.config.probe_timeout_ms)
            .field("generate_timeout_ms", &self.config.generate_timeout_ms)
            .finish_non_exhaustive()
    }
}

impl OllamaClient {
    /// Create a new client
    ///
    /// No global timeout is set; every call carries its own bound.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .build()
            .map_err(|e| InferenceError::Configuration(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized Ollama client"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, InferenceError> {
        Self::new(InferenceConfig::default())
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// List installed models in the order the server reports them
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let timeout_ms = self.config.probe_timeout_ms;
        let response = self
            .client
            .get(self.api_url("tags"))
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e, timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status { status, body });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e, timeout_ms))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

/// `/api/tags` response
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

/// `/api/generate` request body
#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

/// `/api/generate` non-streaming response
#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: Option<String>,
}

#[async_trait]
impl InferenceServer for OllamaClient {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn probe(&self) -> ServerStatus {
        match self.list_models().await {
            Ok(models) => {
                debug!(count = models.len(), "Ollama is reachable");
                ServerStatus::reachable(models)
            },
            Err(e) => {
                warn!(error = %e, "Error checking Ollama status");
                ServerStatus::unreachable()
            },
        }
    }

    #[instrument(skip(self, request), fields(model = %request.model, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        let timeout_ms = self.config.generate_timeout_ms;
        let temperature = request.temperature.value();
        let body = GenerateBody {
            model: request.model.as_str(),
            prompt: &request.prompt,
            temperature,
            stream: false,
            options: GenerateOptions { temperature },
        };

        debug!("Sending generate request to Ollama");

        let response = self
            .client
            .post(self.api_url("generate"))
            .json(&body)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e, timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Ollama API error");
            return Err(InferenceError::Status { status, body });
        }

        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let text = reply
            .response
            .unwrap_or_else(|| EMPTY_RESPONSE.to_string());
        debug!(response_len = text.len(), "Generation completed");
        Ok(text)
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
