//! Chat session - the per-UI-session context
//!
//! Owns the conversation history, the selected model and temperature, and
//! the last observed server readiness. Created empty when a UI session
//! starts and dropped with it; nothing is persisted.

use std::sync::Arc;

use domain::{Conversation, ModelName, Readiness, ServerStatus, SessionId, Temperature};
use tracing::{debug, info, instrument, warn};

use crate::ports::{GenerationOutcome, ProgressSink, PullReport};
use crate::services::SupervisorService;

/// What happened to a submitted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server answered; the reply (or error text) is now in history
    Replied(GenerationOutcome),
    /// The server is up but the selected model is not installed
    ModelMissing(ModelName),
    /// The server could not be reached
    ServerDown,
}

/// State of one interactive chat session
#[derive(Debug)]
pub struct ChatSession {
    id: SessionId,
    supervisor: Arc<SupervisorService>,
    history: Conversation,
    readiness: Readiness,
    last_status: Option<ServerStatus>,
    model: ModelName,
    temperature: Temperature,
}

impl ChatSession {
    /// Start a session with empty history and unknown readiness
    pub fn new(
        supervisor: Arc<SupervisorService>,
        model: ModelName,
        temperature: Temperature,
    ) -> Self {
        let id = SessionId::new();
        debug!(session = %id, model = %model, "Chat session created");
        Self {
            id,
            supervisor,
            history: Conversation::new(),
            readiness: Readiness::Unknown,
            last_status: None,
            model,
            temperature,
        }
    }

    /// Session identifier
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Conversation so far
    pub const fn history(&self) -> &Conversation {
        &self.history
    }

    /// Readiness observed by the most recent probe
    pub const fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Status returned by the most recent probe
    pub const fn last_status(&self) -> Option<&ServerStatus> {
        self.last_status.as_ref()
    }

    /// Selected model
    pub const fn model(&self) -> &ModelName {
        &self.model
    }

    /// Selected temperature
    pub const fn temperature(&self) -> Temperature {
        self.temperature
    }

    fn record(&mut self, status: ServerStatus) -> Readiness {
        self.readiness = status.readiness_for(&self.model);
        self.last_status = Some(status);
        self.readiness
    }

    /// Page-load check: probe and start the server once if needed
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn refresh(&mut self) -> Readiness {
        let status = self.supervisor.ensure_running().await;
        let readiness = self.record(status);
        info!(readiness = %readiness, "Session refreshed");
        readiness
    }

    /// Probe without attempting to start anything
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn check(&mut self) -> Readiness {
        let status = self.supervisor.check_status().await;
        self.record(status)
    }

    /// Operator-triggered start attempt
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn retry_start(&mut self) -> Readiness {
        let status = self.supervisor.start_server().await;
        self.record(status)
    }

    /// Pull the selected model, then probe again
    #[instrument(skip(self, sink), fields(session = %self.id, model = %self.model))]
    pub async fn pull_selected_model(&mut self, sink: &dyn ProgressSink) -> PullReport {
        let model = self.model.clone();
        let report = self.supervisor.pull_model(&model, sink).await;
        self.check().await;
        report
    }

    /// Change the selected model
    ///
    /// Readiness is recomputed from the last probe without a new request.
    pub fn select_model(&mut self, model: ModelName) -> Readiness {
        info!(session = %self.id, model = %model, "Model selected");
        self.model = model;
        if let Some(status) = &self.last_status {
            self.readiness = status.readiness_for(&self.model);
        }
        self.readiness
    }

    /// Change the sampling temperature
    pub fn set_temperature(&mut self, temperature: Temperature) {
        debug!(session = %self.id, temperature = temperature.value(), "Temperature changed");
        self.temperature = temperature;
    }

    /// Empty the conversation history
    pub fn clear_history(&mut self) {
        info!(session = %self.id, turns = self.history.len(), "History cleared");
        self.history.clear();
    }

    /// Handle one operator message
    ///
    /// The server is probed first. The user turn is always recorded; an
    /// assistant turn is added only when a generation request was made,
    /// whether it succeeded or not.
    #[instrument(skip(self, text), fields(session = %self.id, model = %self.model))]
    pub async fn submit(&mut self, text: impl Into<String> + Send) -> SubmitOutcome {
        let status = self.supervisor.check_status().await;
        let readiness = self.record(status);

        self.history.add_user_turn(text);

        match readiness {
            Readiness::ReachableReady => {
                let outcome = self
                    .supervisor
                    .generate(&self.history, &self.model, self.temperature)
                    .await;
                self.history.add_assistant_turn(outcome.text());
                SubmitOutcome::Replied(outcome)
            },
            Readiness::ReachableNoModel => {
                warn!("Selected model is not available");
                SubmitOutcome::ModelMissing(self.model.clone())
            },
            Readiness::Unreachable | Readiness::Unknown => SubmitOutcome::ServerDown,
        }
    }
}
