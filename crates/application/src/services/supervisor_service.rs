//! Local inference server supervision
//!
//! Drives the check / start / fetch / generate sequence against a local
//! server. Every operation returns a usable value; failures are logged and
//! degrade to "not running", an error reply, or a failed pull report.

use std::{fmt, sync::Arc, time::Duration};

use domain::{Conversation, ModelName, ServerStatus, Temperature};
use tracing::{debug, error, info, instrument, warn};

use crate::ports::{
    GenerationOutcome, GenerationPort, ModelFetcherPort, ProgressSink, PullReport,
    ServerLauncherPort, StatusProbePort,
};

/// Default wait between spawning the server and probing it again
pub const DEFAULT_SETTLE_INTERVAL: Duration = Duration::from_secs(5);

/// Supervisor behaviour knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Grace period after a spawn before the follow-up probe
    pub settle_interval: Duration,
    /// Whether [`SupervisorService::ensure_running`] may spawn the server
    pub auto_start: bool,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            settle_interval: DEFAULT_SETTLE_INTERVAL,
            auto_start: true,
        }
    }
}

/// Service coordinating probe, launcher, fetcher and generator
pub struct SupervisorService {
    probe: Arc<dyn StatusProbePort>,
    generator: Arc<dyn GenerationPort>,
    launcher: Arc<dyn ServerLauncherPort>,
    fetcher: Arc<dyn ModelFetcherPort>,
    config: SupervisorConfig,
}

impl fmt::Debug for SupervisorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupervisorService")
            .field("config", &self.config)
            .field("probe", &"<StatusProbePort>")
            .field("generator", &"<GenerationPort>")
            .field("launcher", &"<ServerLauncherPort>")
            .field("fetcher", &"<ModelFetcherPort>")
            .finish()
    }
}

impl SupervisorService {
    /// Create a supervisor with default settings
    pub fn new(
        probe: Arc<dyn StatusProbePort>,
        generator: Arc<dyn GenerationPort>,
        launcher: Arc<dyn ServerLauncherPort>,
        fetcher: Arc<dyn ModelFetcherPort>,
    ) -> Self {
        Self {
            probe,
            generator,
            launcher,
            fetcher,
            config: SupervisorConfig::default(),
        }
    }

    /// Replace the supervisor settings
    #[must_use]
    pub const fn with_config(mut self, config: SupervisorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current settings
    pub const fn config(&self) -> SupervisorConfig {
        self.config
    }

    /// Probe once
    #[instrument(skip(self))]
    pub async fn check_status(&self) -> ServerStatus {
        self.probe.probe().await
    }

    /// Probe, and start the server once if it is not running
    ///
    /// At most one launch and one follow-up probe happen per call. A
    /// server that is still unreachable after the settle interval is
    /// reported as such; the caller decides whether to retry.
    #[instrument(skip(self))]
    pub async fn ensure_running(&self) -> ServerStatus {
        let status = self.probe.probe().await;
        if status.is_reachable() {
            return status;
        }

        if !self.config.auto_start {
            debug!("Server not running and auto start disabled");
            return status;
        }

        warn!("Ollama is not running, trying to start it");
        self.start_server().await
    }

    /// Launch the server, wait for it to settle, then probe once
    ///
    /// A failed spawn is logged and reported as unreachable without
    /// probing again.
    #[instrument(skip(self))]
    pub async fn start_server(&self) -> ServerStatus {
        match self.launcher.launch().await {
            Ok(receipt) => {
                info!(
                    pid = ?receipt.pid,
                    settle = ?self.config.settle_interval,
                    "Server process spawned, waiting before probing"
                );
                tokio::time::sleep(self.config.settle_interval).await;
                let status = self.probe.probe().await;
                if status.is_reachable() {
                    info!(models = status.available_models().len(), "Server is up");
                } else {
                    warn!("Server still unreachable after settle interval");
                }
                status
            },
            Err(e) => {
                error!(error = %e, "Error starting Ollama");
                ServerStatus::unreachable()
            },
        }
    }

    /// Download a model, streaming progress into `sink`
    ///
    /// Blocks until the fetch process has finished. Failures become a
    /// failed report.
    #[instrument(skip(self, sink), fields(model = %model))]
    pub async fn pull_model(&self, model: &ModelName, sink: &dyn ProgressSink) -> PullReport {
        match self.fetcher.pull(model, sink).await {
            Ok(report) => {
                info!(lines = report.progress_lines, "Model pull finished");
                report
            },
            Err(e) => {
                error!(error = %e, "Error pulling model");
                PullReport::failed(model.clone(), e.to_string())
            },
        }
    }

    /// Generate the next assistant turn for `history`
    #[instrument(skip(self, history), fields(model = %model, turns = history.len()))]
    pub async fn generate(
        &self,
        history: &Conversation,
        model: &ModelName,
        temperature: Temperature,
    ) -> GenerationOutcome {
        let outcome = self.generator.generate(history, model, temperature).await;
        if outcome.is_failure() {
            warn!(reply = %outcome.text(), "Generation failed");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::Sequence;

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{
        CollectingSink, LaunchReceipt, MockGenerationPort, MockServerLauncherPort,
        MockStatusProbePort,
    };

    /// Fetcher that replays canned lines
    #[derive(Default)]
    struct FakeFetcher {
        lines: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl ModelFetcherPort for FakeFetcher {
        async fn pull(
            &self,
            model: &ModelName,
            sink: &dyn ProgressSink,
        ) -> Result<PullReport, ApplicationError> {
            for line in &self.lines {
                sink.on_line(line);
            }
            if self.fail {
                Err(ApplicationError::ProcessFailed("exit status: 1".into()))
            } else {
                Ok(PullReport::completed(model.clone(), self.lines.len()))
            }
        }
    }

    fn model(name: &str) -> ModelName {
        ModelName::new(name).unwrap()
    }

    fn immediate() -> SupervisorConfig {
        SupervisorConfig {
            settle_interval: Duration::ZERO,
            auto_start: true,
        }
    }

    fn supervisor(
        probe: MockStatusProbePort,
        launcher: MockServerLauncherPort,
        generator: MockGenerationPort,
        fetcher: FakeFetcher,
    ) -> SupervisorService {
        SupervisorService::new(
            Arc::new(probe),
            Arc::new(generator),
            Arc::new(launcher),
            Arc::new(fetcher),
        )
        .with_config(immediate())
    }

    #[tokio::test]
    async fn ensure_running_skips_launch_when_reachable() {
        let mut probe = MockStatusProbePort::new();
        probe
            .expect_probe()
            .times(1)
            .returning(|| ServerStatus::reachable(vec!["llama2:latest".into()]));
        let mut launcher = MockServerLauncherPort::new();
        launcher.expect_launch().never();

        let svc = supervisor(probe, launcher, MockGenerationPort::new(), FakeFetcher::default());
        let status = svc.ensure_running().await;

        assert!(status.is_reachable());
        assert_eq!(status.available_models(), ["llama2:latest"]);
    }

    #[tokio::test]
    async fn ensure_running_launches_once_and_reprobes() {
        let mut seq = Sequence::new();
        let mut probe = MockStatusProbePort::new();
        probe
            .expect_probe()
            .times(1)
            .in_sequence(&mut seq)
            .returning(ServerStatus::unreachable);
        let mut launcher = MockServerLauncherPort::new();
        launcher
            .expect_launch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(LaunchReceipt { pid: Some(4242) }));
        probe
            .expect_probe()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| ServerStatus::reachable(Vec::new()));

        let svc = supervisor(probe, launcher, MockGenerationPort::new(), FakeFetcher::default());
        let status = svc.ensure_running().await;

        assert!(status.is_reachable());
        assert!(status.available_models().is_empty());
    }

    #[tokio::test]
    async fn ensure_running_gives_up_after_one_cycle() {
        let mut probe = MockStatusProbePort::new();
        probe
            .expect_probe()
            .times(2)
            .returning(ServerStatus::unreachable);
        let mut launcher = MockServerLauncherPort::new();
        launcher
            .expect_launch()
            .times(1)
            .returning(|| Ok(LaunchReceipt { pid: None }));

        let svc = supervisor(probe, launcher, MockGenerationPort::new(), FakeFetcher::default());
        let status = svc.ensure_running().await;

        assert!(!status.is_reachable());
    }

    #[tokio::test]
    async fn spawn_failure_is_not_retried_or_reprobed() {
        let mut probe = MockStatusProbePort::new();
        probe
            .expect_probe()
            .times(1)
            .returning(ServerStatus::unreachable);
        let mut launcher = MockServerLauncherPort::new();
        launcher
            .expect_launch()
            .times(1)
            .returning(|| Err(ApplicationError::ProcessSpawn("permission denied".into())));

        let svc = supervisor(probe, launcher, MockGenerationPort::new(), FakeFetcher::default());
        let status = svc.ensure_running().await;

        assert!(!status.is_reachable());
        assert!(status.available_models().is_empty());
    }

    #[tokio::test]
    async fn auto_start_disabled_only_probes() {
        let mut probe = MockStatusProbePort::new();
        probe
            .expect_probe()
            .times(1)
            .returning(ServerStatus::unreachable);
        let mut launcher = MockServerLauncherPort::new();
        launcher.expect_launch().never();

        let svc = supervisor(probe, launcher, MockGenerationPort::new(), FakeFetcher::default())
            .with_config(SupervisorConfig {
                settle_interval: Duration::ZERO,
                auto_start: false,
            });

        assert!(!svc.ensure_running().await.is_reachable());
    }

    #[tokio::test]
    async fn start_server_launches_even_if_running() {
        let mut probe = MockStatusProbePort::new();
        probe
            .expect_probe()
            .times(1)
            .returning(|| ServerStatus::reachable(vec!["phi".into()]));
        let mut launcher = MockServerLauncherPort::new();
        launcher
            .expect_launch()
            .times(1)
            .returning(|| Ok(LaunchReceipt { pid: Some(1) }));

        let svc = supervisor(probe, launcher, MockGenerationPort::new(), FakeFetcher::default());

        assert!(svc.start_server().await.is_reachable());
    }

    #[tokio::test]
    async fn pull_model_streams_progress() {
        let fetcher = FakeFetcher {
            lines: vec!["pulling manifest", "verifying sha256 digest", "success"],
            ..Default::default()
        };
        let svc = supervisor(
            MockStatusProbePort::new(),
            MockServerLauncherPort::new(),
            MockGenerationPort::new(),
            fetcher,
        );

        let sink = CollectingSink::new();
        let report = svc.pull_model(&model("phi"), &sink).await;

        assert!(report.succeeded());
        assert_eq!(report.progress_lines, 3);
        assert_eq!(sink.lines().last().map(String::as_str), Some("success"));
    }

    #[tokio::test]
    async fn pull_failure_degrades_to_report() {
        let fetcher = FakeFetcher {
            lines: vec!["Error: pull model manifest: file does not exist"],
            fail: true,
        };
        let svc = supervisor(
            MockStatusProbePort::new(),
            MockServerLauncherPort::new(),
            MockGenerationPort::new(),
            fetcher,
        );

        let sink = CollectingSink::new();
        let report = svc.pull_model(&model("nonexistent"), &sink).await;

        assert!(!report.succeeded());
        assert_eq!(report.model.as_str(), "nonexistent");
        assert!(report.error.unwrap().contains("exit status: 1"));
        assert_eq!(sink.lines().len(), 1);
    }

    #[tokio::test]
    async fn generate_passes_history_through() {
        let mut generator = MockGenerationPort::new();
        generator
            .expect_generate()
            .withf(|history, model, temperature| {
                history.len() == 1
                    && model.as_str() == "llama2"
                    && (temperature.value() - 0.3).abs() < f32::EPSILON
            })
            .times(1)
            .returning(|_, _, _| GenerationOutcome::Generated("hello".into()));

        let svc = supervisor(
            MockStatusProbePort::new(),
            MockServerLauncherPort::new(),
            generator,
            FakeFetcher::default(),
        );

        let mut history = Conversation::new();
        history.add_user_turn("hi");
        let outcome = svc
            .generate(&history, &model("llama2"), Temperature::new(0.3).unwrap())
            .await;

        assert_eq!(outcome, GenerationOutcome::Generated("hello".into()));
    }

    #[test]
    fn default_config_matches_settle_interval() {
        let config = SupervisorConfig::default();
        assert_eq!(config.settle_interval, Duration::from_secs(5));
        assert!(config.auto_start);
    }
}
