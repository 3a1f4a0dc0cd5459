//! Model fetcher port

use async_trait::async_trait;
use domain::ModelName;
use parking_lot::Mutex;

use crate::error::ApplicationError;

/// Receives pull progress one line at a time, as it arrives
pub trait ProgressSink: Send + Sync {
    /// Called for every non-empty, trimmed progress line
    fn on_line(&self, line: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_line(&self, line: &str) {
        self(line);
    }
}

/// Sink that keeps every line in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    lines: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines received so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl ProgressSink for CollectingSink {
    fn on_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Summary of a finished pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullReport {
    /// Model that was requested
    pub model: ModelName,
    /// Number of progress lines forwarded to the sink
    pub progress_lines: usize,
    /// Failure reason, if the pull did not succeed
    pub error: Option<String>,
}

impl PullReport {
    /// Report for a pull that ran to a successful exit
    pub const fn completed(model: ModelName, progress_lines: usize) -> Self {
        Self {
            model,
            progress_lines,
            error: None,
        }
    }

    /// Report for a pull that could not complete
    pub fn failed(model: ModelName, reason: impl Into<String>) -> Self {
        Self {
            model,
            progress_lines: 0,
            error: Some(reason.into()),
        }
    }

    /// Whether the pull finished successfully
    pub const fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Port for downloading a model through the server's own tooling
///
/// The call blocks until the external process has both closed its output
/// and exited. There is no cancellation.
#[async_trait]
pub trait ModelFetcherPort: Send + Sync {
    /// Pull `model`, streaming progress lines into `sink`
    async fn pull(
        &self,
        model: &ModelName,
        sink: &dyn ProgressSink,
    ) -> Result<PullReport, ApplicationError>;
}
