//! Logging setup
//!
//! Installs a `tracing-subscriber` registry writing to stderr, so log
//! records never interleave with chat output on stdout.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Logging could not be initialised
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Filter directive did not parse
    #[error("Invalid log filter {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    /// A global subscriber is already installed
    #[error("Logging already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Map a `-v` count to a filter directive
///
/// Returns `None` for zero so the configured level applies.
pub const fn log_filter_from_verbosity(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Filter directive used when `RUST_LOG` is not set
pub fn effective_directive(config: &LoggingConfig, verbosity: u8) -> String {
    log_filter_from_verbosity(verbosity).map_or_else(|| config.level.clone(), str::to_string)
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `-v`, which wins over the configured level.
pub fn init_logging(config: &LoggingConfig, verbosity: u8) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = effective_directive(config, verbosity);
            EnvFilter::try_new(&directive).map_err(|e| TelemetryError::InvalidFilter {
                directive,
                reason: e.to_string(),
            })?
        },
    };

    let (text, json) = match config.format {
        LogFormat::Text => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialised(e.to_string()))
}
