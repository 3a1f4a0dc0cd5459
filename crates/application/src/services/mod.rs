//! Application services - Use case implementations

mod chat_session;
mod supervisor_service;

pub use chat_session::{ChatSession, SubmitOutcome};
pub use supervisor_service::{DEFAULT_SETTLE_INTERVAL, SupervisorConfig, SupervisorService};
