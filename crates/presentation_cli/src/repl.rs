//! Line parser for the interactive chat loop

use domain::{ModelName, Temperature};

/// One line of operator input
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Text to send as a chat turn
    Say(String),
    /// Download the selected model
    Pull,
    /// Launch the server and probe again
    Start,
    /// Forget the conversation
    Clear,
    /// Show the catalogue, or switch to the given model
    Model(Option<ModelName>),
    /// Show, or set, the sampling temperature
    Temperature(Option<Temperature>),
    /// Probe the server
    Status,
    /// Print the conversation so far
    History,
    /// List commands
    Help,
    /// Leave the loop
    Quit,
    /// Blank line
    Empty,
    /// Slash command that could not be understood
    Invalid(String),
}

/// Help text listing every slash command
pub const HELP: &str = "\
Commands:
  /pull               download the selected model
  /start              start the Ollama server
  /clear              clear the conversation
  /model [NAME]       list models, or switch to NAME
  /temperature [T]    show, or set, the temperature (0.0 - 1.0)
  /status             check the server
  /history            show the conversation
  /help               show this help
  /quit               leave
Anything else is sent to the model.";

impl ReplCommand {
    /// Parse one input line
    ///
    /// Chat text is passed on exactly as typed.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Say(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        match name.to_ascii_lowercase().as_str() {
            "pull" => Self::Pull,
            "start" => Self::Start,
            "clear" => Self::Clear,
            "status" => Self::Status,
            "history" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "model" => match arg.map(str::parse::<ModelName>).transpose() {
                Ok(model) => Self::Model(model),
                Err(e) => Self::Invalid(e.to_string()),
            },
            "temperature" | "temp" => match arg.map(str::parse::<Temperature>).transpose() {
                Ok(temperature) => Self::Temperature(temperature),
                Err(e) => Self::Invalid(e.to_string()),
            },
            other => Self::Invalid(format!("unknown command /{other}, try /help")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_chat_turn() {
        assert_eq!(
            ReplCommand::parse("hello there"),
            ReplCommand::Say("hello there".into())
        );
    }

    #[test]
    fn chat_text_keeps_surrounding_whitespace() {
        assert_eq!(
            ReplCommand::parse("    indented code\t"),
            ReplCommand::Say("    indented code\t".into())
        );
    }

    #[test]
    fn indented_slash_is_still_a_command() {
        assert_eq!(ReplCommand::parse("  /pull "), ReplCommand::Pull);
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn simple_commands() {
        assert_eq!(ReplCommand::parse("/pull"), ReplCommand::Pull);
        assert_eq!(ReplCommand::parse("/start"), ReplCommand::Start);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("/status"), ReplCommand::Status);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/HELP"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
    }

    #[test]
    fn model_with_and_without_argument() {
        assert_eq!(ReplCommand::parse("/model"), ReplCommand::Model(None));
        assert_eq!(
            ReplCommand::parse("/model  mistral "),
            ReplCommand::Model(Some(ModelName::new("mistral").unwrap()))
        );
    }

    #[test]
    fn model_with_space_is_invalid() {
        assert!(matches!(
            ReplCommand::parse("/model neural chat"),
            ReplCommand::Invalid(_)
        ));
    }

    #[test]
    fn temperature_is_range_checked() {
        assert_eq!(
            ReplCommand::parse("/temperature 0.2"),
            ReplCommand::Temperature(Some(Temperature::new(0.2).unwrap()))
        );
        assert_eq!(ReplCommand::parse("/temp"), ReplCommand::Temperature(None));
        assert!(matches!(
            ReplCommand::parse("/temperature 2"),
            ReplCommand::Invalid(_)
        ));
    }

    #[test]
    fn unknown_command_is_invalid() {
        let ReplCommand::Invalid(message) = ReplCommand::parse("/dance") else {
            panic!("expected invalid");
        };
        assert!(message.contains("/dance"));
    }

    #[test]
    fn help_mentions_every_command() {
        for command in [
            "/pull",
            "/start",
            "/clear",
            "/model",
            "/temperature",
            "/status",
            "/history",
            "/help",
            "/quit",
        ] {
            assert!(HELP.contains(command), "{command} missing from help");
        }
    }
}
