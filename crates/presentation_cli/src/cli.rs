//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::{ModelName, Temperature};
use infrastructure::AppConfig;

/// Chat with a model served by a local Ollama instance
#[derive(Debug, Parser)]
#[command(name = "localchat")]
#[command(author, version, about = "Chat with a local Ollama server", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "LOCALCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ollama base URL
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Model to chat with
    #[arg(short, long, global = true)]
    pub model: Option<ModelName>,

    /// Sampling temperature between 0.0 and 1.0
    #[arg(short, long, global = true, value_parser = parse_temperature)]
    pub temperature: Option<Temperature>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive chat (default)
    Chat,

    /// Probe the server and list installed models
    Status,

    /// Launch the server in the background and probe it again
    Start,

    /// Download a model, streaming progress
    Pull {
        /// Model to download (defaults to the selected model)
        model: Option<ModelName>,
    },

    /// Send a single message and print the reply
    Ask {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// List the configured models and mark installed ones
    Models,

    /// Print the effective configuration as TOML
    Config,
}

fn parse_temperature(s: &str) -> Result<Temperature, String> {
    s.parse().map_err(|e: domain::DomainError| e.to_string())
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(url) = &self.url {
            config.inference.base_url.clone_from(url);
        }
        if let Some(model) = &self.model {
            config.inference.default_model = model.to_string();
        }
        if let Some(temperature) = self.temperature {
            config.inference.temperature = temperature.value();
        }
    }

    /// Subcommand to run, leaving `None` behind
    pub fn take_command(&mut self) -> Commands {
        self.command.take().unwrap_or(Commands::Chat)
    }

    /// Joined message text of `ask`
    pub fn ask_message(message: &[String]) -> String {
        message.join(" ")
    }
}
