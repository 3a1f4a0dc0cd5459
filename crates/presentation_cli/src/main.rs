//! LocalChat CLI
//!
//! Chat with a model served by a local Ollama instance, starting the server
//! and pulling models when needed.

#![allow(clippy::print_stdout)]

mod cli;
mod repl;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::{ChatSession, GenerationOutcome, PullReport, SubmitOutcome};
use clap::Parser;
use domain::{ModelName, Readiness, ServerStatus};
use infrastructure::{AppConfig, build_supervisor, init_logging};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::repl::{HELP, ReplCommand};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let mut cli = Cli::parse();

    let loaded = AppConfig::load(cli.config.as_deref());
    let mut config = loaded.as_ref().map_or_else(|_| AppConfig::default(), Clone::clone);
    cli.apply_overrides(&mut config);

    init_logging(&config.logging, cli.verbose).context("failed to initialise logging")?;
    if let Err(e) = &loaded {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }
    config
        .validate()
        .context("invalid command-line override")?;

    let command = cli.take_command();
    if matches!(command, Commands::Config) {
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let supervisor = Arc::new(build_supervisor(&config)?);
    let mut session = ChatSession::new(
        supervisor,
        config.inference.default_model_name()?,
        config.inference.default_temperature()?,
    );
    debug!(session = %session.id(), "Session created");

    match command {
        Commands::Chat => run_chat(&mut session, &config).await,
        Commands::Status => {
            let readiness = session.check().await;
            print_status(&session, readiness, &config);
            Ok(exit_code(readiness.is_reachable()))
        },
        Commands::Start => {
            println!("🚀 Starting Ollama...");
            let readiness = session.retry_start().await;
            print_status(&session, readiness, &config);
            Ok(exit_code(readiness.is_reachable()))
        },
        Commands::Pull { model } => {
            if let Some(model) = model {
                session.select_model(model);
            }
            let report = pull(&mut session).await;
            Ok(exit_code(report.succeeded()))
        },
        Commands::Ask { message } => {
            session.refresh().await;
            let outcome = session.submit(Cli::ask_message(&message)).await;
            let replied = matches!(
                &outcome,
                SubmitOutcome::Replied(GenerationOutcome::Generated(_))
            );
            print_outcome(&outcome);
            Ok(exit_code(replied))
        },
        Commands::Models => {
            session.check().await;
            print_models(&session, &config);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Config => Ok(ExitCode::SUCCESS),
    }
}

const fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run_chat(session: &mut ChatSession, config: &AppConfig) -> anyhow::Result<ExitCode> {
    println!("💬 LocalChat");
    let readiness = session.refresh().await;
    print_status(session, readiness, config);
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n[{}] > ", session.model());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Empty => {},
            ReplCommand::Say(text) => {
                let outcome = session.submit(text).await;
                print_outcome(&outcome);
            },
            ReplCommand::Pull => {
                pull(session).await;
            },
            ReplCommand::Start => {
                println!("🚀 Starting Ollama...");
                let readiness = session.retry_start().await;
                print_status(session, readiness, config);
            },
            ReplCommand::Clear => {
                session.clear_history();
                println!("🧹 Conversation cleared");
            },
            ReplCommand::Model(None) => print_models(session, config),
            ReplCommand::Model(Some(model)) => {
                let readiness = session.select_model(model);
                println!("📦 Model: {} ({readiness})", session.model());
            },
            ReplCommand::Temperature(None) => {
                println!("🌡️  Temperature: {}", session.temperature());
            },
            ReplCommand::Temperature(Some(temperature)) => {
                session.set_temperature(temperature);
                println!("🌡️  Temperature set to {temperature}");
            },
            ReplCommand::Status => {
                let readiness = session.check().await;
                print_status(session, readiness, config);
            },
            ReplCommand::History => print_history(session),
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Invalid(message) => println!("❓ {message}"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn pull(session: &mut ChatSession) -> PullReport {
    println!("⬇️  Pulling {}...", session.model());
    let printer = |line: &str| println!("   {line}");
    let report = session.pull_selected_model(&printer).await;

    match &report.error {
        None => println!("✅ Pulled {} ({})", report.model, session.readiness()),
        Some(error) => println!("❌ Pull failed: {error}"),
    }
    report
}

fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Replied(GenerationOutcome::Generated(text)) => println!("\n🤖 {text}"),
        SubmitOutcome::Replied(GenerationOutcome::Failed(text)) => println!("\n❌ {text}"),
        SubmitOutcome::ModelMissing(model) => {
            println!("⚠️  Model '{model}' is not installed. Use /pull or `localchat pull {model}`.");
        },
        SubmitOutcome::ServerDown => {
            println!("❌ Ollama is not running. Use /start or `localchat start`.");
        },
    }
}

fn print_status(session: &ChatSession, readiness: Readiness, config: &AppConfig) {
    match readiness {
        Readiness::Unknown | Readiness::Unreachable => {
            println!("❌ Ollama is not running at {}", config.inference.base_url);
            let executable = config.server.resolve_executable().map_or_else(
                || "ollama".to_string(),
                |path| path.display().to_string(),
            );
            println!("   Start it with `{executable} serve`, or use /start.");
            return;
        },
        Readiness::ReachableNoModel => {
            println!("✅ Ollama is running at {}", config.inference.base_url);
            println!(
                "⚠️  Model '{}' is not installed. Use /pull to download it.",
                session.model()
            );
        },
        Readiness::ReachableReady => {
            println!("✅ Ollama is running at {}", config.inference.base_url);
            println!(
                "📦 Model: {}  🌡️  Temperature: {}",
                session.model(),
                session.temperature()
            );
        },
    }

    if let Some(status) = session.last_status() {
        print_installed(status);
    }
}

fn print_installed(status: &ServerStatus) {
    if status.available_models().is_empty() {
        println!("   No models installed.");
    } else {
        println!("   Installed: {}", status.available_models().join(", "));
    }
}

fn print_models(session: &ChatSession, config: &AppConfig) {
    let status = session.last_status();
    println!("📦 Models:");
    for name in &config.inference.models {
        let Ok(model) = name.parse::<ModelName>() else {
            continue;
        };
        let installed = status.is_some_and(|s| s.has_model(&model));
        let selected = if &model == session.model() { " (selected)" } else { "" };
        let mark = if installed { "✅" } else { "⬜" };
        println!("  {mark} {model}{selected}");
    }

    match status {
        Some(status) if status.is_reachable() => print_installed(status),
        _ => println!("   Ollama is not running, installed models unknown."),
    }
}

fn print_history(session: &ChatSession) {
    if session.history().is_empty() {
        println!("(no messages yet)");
        return;
    }
    for turn in session.history().turns() {
        println!("{}: {}", turn.role.transcript_label(), turn.content);
    }
}
