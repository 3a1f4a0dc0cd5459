//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: local server executable and launch behaviour
//! - `logging`: log format and default level
//!
//! The inference section reuses [`ai_core::InferenceConfig`].

mod logging;
mod server;

use std::path::Path;

use ai_core::InferenceConfig;
use application::SupervisorConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use logging::{LogFormat, LoggingConfig};
pub use server::{DEFAULT_EXECUTABLE_NAME, ServerProcessConfig};

/// Prefix for environment overrides, e.g. `LOCALCHAT_INFERENCE__BASE_URL`
pub const ENV_PREFIX: &str = "LOCALCHAT";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config";

const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ollama endpoint, models and sampling defaults
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Local server process
    #[serde(default)]
    pub server: ServerProcessConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// With `path` the file must exist; without it an optional `config.toml`
    /// in the working directory is read. Environment variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // e.g. LOCALCHAT_SERVER__AUTO_START=false
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(base_url = %config.inference.base_url, "Loaded configuration");
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load configuration, using defaults");
            Self::default()
        })
    }

    /// Check cross-field constraints the deserializer cannot express
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.inference
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Supervisor settings derived from the `[server]` section
    pub const fn supervisor_config(&self) -> SupervisorConfig {
        self.server.supervisor_config()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use tempfile::NamedTempFile;

    use super::*;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inference.base_url, "http://localhost:11434");
        assert_eq!(config.inference.default_model, "llama2");
        assert!(config.server.auto_start);
    }

    #[test]
    fn loads_sections_from_file() {
        let file = toml_file(
            r#"
            [inference]
            base_url = "http://gpu-box:11434"
            default_model = "mistral"
            temperature = 0.2

            [server]
            executable = "/opt/ollama/bin/ollama"
            settle_interval_secs = 2
            auto_start = false

            [logging]
            format = "json"
            level = "debug"
            "#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.inference.base_url, "http://gpu-box:11434");
        assert_eq!(config.inference.default_model, "mistral");
        assert!((config.inference.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.inference.probe_timeout_ms, 5_000);
        assert_eq!(config.supervisor_config().settle_interval, Duration::from_secs(2));
        assert!(!config.server.auto_start);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = toml_file("[logging]\nlevel = \"info\"\n");

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.inference.models.len(), 6);
        assert_eq!(config.server.settle_interval_secs, 5);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let config = AppConfig::load_or_default(Some(&missing));

        assert_eq!(config.inference.default_model, "llama2");
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let file = toml_file("[inference]\ntemperature = 1.5\n");

        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let file = toml_file("[inference]\nbase_url = \"localhost:11434\"\n");

        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn empty_model_catalogue_is_rejected() {
        let mut config = AppConfig::default();
        config.inference.models.clear();

        assert!(config.validate().is_err());
    }

    #[test]
    fn to_toml_renders_every_section() {
        let rendered = AppConfig::default().to_toml().unwrap();

        assert!(rendered.contains("[inference]"));
        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("[logging]"));
        assert!(rendered.contains("base_url = \"http://localhost:11434\""));

        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.inference.default_model, "llama2");
    }
}
