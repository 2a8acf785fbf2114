use clap::Subcommand;

use crate::session::theme::ColorMode;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the login screen and chat (default)
    Chat,

    /// Query the backend's health endpoint
    Health,

    /// Inspect or change the stored configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    Show,

    SetBaseUrl {
        url: String,
    },

    SetColor {
        mode: ColorMode,
    },

    ToggleWelcome,
}

/// Slash commands typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Welcome,
    Suggest(usize),
    Logout,
    Exit,
    Unknown(String),
}

impl ChatCommand {
    /// Parses the text after the leading `/`.
    pub fn parse(command: &str) -> Self {
        let parts: Vec<&str> = command.split_whitespace().collect();
        let Some(name) = parts.first() else {
            return ChatCommand::Help;
        };

        match (name.to_lowercase().as_str(), parts.get(1)) {
            ("ayuda" | "help", _) => ChatCommand::Help,
            ("sugerencias" | "welcome", _) => ChatCommand::Welcome,
            ("sugerir" | "suggest", Some(n)) => match n.parse() {
                Ok(n) => ChatCommand::Suggest(n),
                Err(_) => ChatCommand::Unknown(command.trim().to_string()),
            },
            ("salir" | "logout", _) => ChatCommand::Logout,
            ("exit" | "quit", _) => ChatCommand::Exit,
            _ => ChatCommand::Unknown(command.trim().to_string()),
        }
    }
}

pub const HELP: &str = "\
Comandos disponibles:
  /ayuda           - muestra esta ayuda
  /sugerencias     - muestra el panel de bienvenida
  /sugerir <n>     - pregunta por la sugerencia n
  /salir           - cierra sesión y vuelve al inicio
  /exit            - termina el programa";
