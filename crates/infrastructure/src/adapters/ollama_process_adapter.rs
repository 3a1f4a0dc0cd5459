//! Process adapter - Implements the launcher and fetcher ports over the
//! `ollama` executable

use application::{
    error::ApplicationError,
    ports::{LaunchReceipt, ModelFetcherPort, ProgressSink, PullReport, ServerLauncherPort},
};
use async_trait::async_trait;
use domain::ModelName;
use tracing::instrument;

use crate::process::{OllamaProcess, ProcessError};

impl From<ProcessError> for ApplicationError {
    fn from(e: ProcessError) -> Self {
        match e {
            ProcessError::NotFound(_) | ProcessError::Spawn { .. } => {
                Self::ProcessSpawn(e.to_string())
            },
            ProcessError::Io { .. } | ProcessError::Failed { .. } => {
                Self::ProcessFailed(e.to_string())
            },
        }
    }
}

/// Adapter starting the server and pulling models through its CLI
#[derive(Debug, Clone)]
pub struct OllamaProcessAdapter {
    process: OllamaProcess,
}

impl OllamaProcessAdapter {
    /// Wrap a process handle
    pub const fn new(process: OllamaProcess) -> Self {
        Self { process }
    }
}

#[async_trait]
impl ServerLauncherPort for OllamaProcessAdapter {
    async fn launch(&self) -> Result<LaunchReceipt, ApplicationError> {
        let pid = self.process.launch()?;
        Ok(LaunchReceipt { pid })
    }
}

#[async_trait]
impl ModelFetcherPort for OllamaProcessAdapter {
    #[instrument(skip(self, sink), fields(model = %model))]
    async fn pull(
        &self,
        model: &ModelName,
        sink: &dyn ProgressSink,
    ) -> Result<PullReport, ApplicationError> {
        let forwarded = self
            .process
            .pull(model.as_str(), |line| sink.on_line(line))
            .await?;
        Ok(PullReport::completed(model.clone(), forwarded))
    }
}
