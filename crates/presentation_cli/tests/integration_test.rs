//! Integration tests for the CLI
//!
//! These run the built `localchat` binary. None of them needs a running
//! Ollama server: the unreachable cases point at a closed port.

use std::io::Write;
use std::process::{Command, Output};

const CLOSED_PORT_URL: &str = "http://127.0.0.1:1";

fn localchat(args: &[&str]) -> Output {
    let workdir = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_localchat"))
        .args(args)
        .current_dir(workdir.path())
        .env_remove("RUST_LOG")
        .env_remove("LOCALCHAT_CONFIG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let output = localchat(&["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["chat", "status", "start", "pull", "ask", "models", "config"] {
        assert!(text.contains(command), "{command} missing from help");
    }
}

#[test]
fn config_prints_defaults_as_toml() {
    let output = localchat(&["config"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[inference]"));
    assert!(text.contains("base_url = \"http://localhost:11434\""));
    assert!(text.contains("default_model = \"llama2\""));
    assert!(text.contains("settle_interval_secs = 5"));
}

#[test]
fn config_applies_flags_and_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[inference]\ndefault_model = \"phi\"\n").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let output = localchat(&["--config", &path, "--temperature", "0.5", "config"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("default_model = \"phi\""));
    assert!(text.contains("temperature = 0.5"));
}

#[test]
fn out_of_range_temperature_is_rejected() {
    let output = localchat(&["--temperature", "1.5", "config"]);

    assert!(!output.status.success());
}

#[test]
fn status_fails_when_server_is_down() {
    let output = localchat(&["--url", CLOSED_PORT_URL, "status"]);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("not running"));
}

#[test]
fn models_marks_nothing_installed_when_server_is_down() {
    let output = localchat(&["--url", CLOSED_PORT_URL, "models"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("llama2 (selected)"));
    assert!(text.contains("tinyllama"));
    assert!(!text.contains('✅'));
}
