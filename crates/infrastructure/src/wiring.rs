//! Assembly of the supervisor from configuration

use std::sync::Arc;

use ai_core::{InferenceServer, OllamaClient};
use application::{ApplicationError, SupervisorService};
use tracing::info;

use crate::adapters::{OllamaGenerationAdapter, OllamaProcessAdapter, OllamaStatusAdapter};
use crate::config::AppConfig;
use crate::process::OllamaProcess;

/// Build a supervisor wired to a real Ollama server and executable
pub fn build_supervisor(config: &AppConfig) -> Result<SupervisorService, ApplicationError> {
    let executable = config.server.resolve_executable().ok_or_else(|| {
        ApplicationError::Configuration(
            "cannot locate the server executable: no home directory".to_string(),
        )
    })?;

    let client = OllamaClient::new(config.inference.clone())
        .map_err(|e| ApplicationError::Inference(e.to_string()))?;
    let server: Arc<dyn InferenceServer> = Arc::new(client);
    let process = OllamaProcessAdapter::new(OllamaProcess::new(&executable));
    let process = Arc::new(process);

    info!(
        base_url = %config.inference.base_url,
        executable = %executable.display(),
        "Supervisor ready"
    );

    Ok(SupervisorService::new(
        Arc::new(OllamaStatusAdapter::new(Arc::clone(&server))),
        Arc::new(OllamaGenerationAdapter::new(server)),
        Arc::clone(&process) as _,
        process,
    )
    .with_config(config.supervisor_config()))
}
