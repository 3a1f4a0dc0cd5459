//! Local server process configuration.

use std::path::PathBuf;
use std::time::Duration;

use application::SupervisorConfig;
use serde::{Deserialize, Serialize};

use super::default_true;

/// File name of the server executable inside the home directory
pub const DEFAULT_EXECUTABLE_NAME: &str = "ollama";

/// How the supervisor launches and waits for the local server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerProcessConfig {
    /// Path to the server executable (defaults to `~/ollama`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,

    /// Seconds to wait after launching before probing again
    #[serde(default = "default_settle_interval_secs")]
    pub settle_interval_secs: u64,

    /// Launch the server automatically when the first probe fails
    #[serde(default = "default_true")]
    pub auto_start: bool,
}

const fn default_settle_interval_secs() -> u64 {
    5
}

impl Default for ServerProcessConfig {
    fn default() -> Self {
        Self {
            executable: None,
            settle_interval_secs: default_settle_interval_secs(),
            auto_start: true,
        }
    }
}

impl ServerProcessConfig {
    /// Resolve the executable path
    ///
    /// A configured path starting with `~/` is expanded against the home
    /// directory. Returns `None` only when no path is configured and the
    /// home directory cannot be determined.
    pub fn resolve_executable(&self) -> Option<PathBuf> {
        match &self.executable {
            Some(path) => match path.strip_prefix("~") {
                Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
                Err(_) => Some(path.clone()),
            },
            None => dirs::home_dir().map(|home| home.join(DEFAULT_EXECUTABLE_NAME)),
        }
    }

    /// Settle interval as a duration
    pub const fn settle_interval(&self) -> Duration {
        Duration::from_secs(self.settle_interval_secs)
    }

    /// Supervisor settings derived from this section
    pub const fn supervisor_config(&self) -> SupervisorConfig {
        SupervisorConfig {
            settle_interval: self.settle_interval(),
            auto_start: self.auto_start,
        }
    }
}
