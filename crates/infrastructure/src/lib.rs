//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the Ollama HTTP API,
//! the `ollama` executable, configuration loading and logging.

pub mod adapters;
pub mod config;
pub mod process;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, LoggingConfig, ServerProcessConfig};
pub use process::{OllamaProcess, ProcessError};
pub use telemetry::{TelemetryError, init_logging, log_filter_from_verbosity};
pub use wiring::build_supervisor;
