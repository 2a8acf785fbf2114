use crossterm::style::{Color, Stylize};
use inquire::{InquireError, Select};
use std::fmt;
use tracing::info;

use crate::error::Result;
use crate::ui::welcome::FOOTER;

const APP_NAME: &str = "SostenibiliChat";
const APP_TAGLINE: &str = "Asistente Virtual de Sostenibilidad";

pub fn render_header(styled: bool) -> String {
    if styled {
        format!(
            "{} {}\n{}",
            "❦".with(Color::Green),
            APP_NAME.with(Color::Cyan).bold(),
            APP_TAGLINE.with(Color::DarkGrey)
        )
    } else {
        format!("{APP_NAME}\n{APP_TAGLINE}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginChoice {
    Google,
    Quit,
}

impl fmt::Display for LoginChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginChoice::Google => write!(f, "Iniciar sesión con Google"),
            LoginChoice::Quit => write!(f, "Salir"),
        }
    }
}

pub fn render_login(styled: bool) -> String {
    let title = "BBVA Sostenibilidad";
    let subtitle = "Tu asistente virtual";
    if styled {
        format!(
            "{}\n{}\n\n{}",
            title.with(Color::Cyan).bold(),
            subtitle,
            FOOTER.with(Color::DarkGrey)
        )
    } else {
        format!("{title}\n{subtitle}\n\n{FOOTER}")
    }
}

/// Login screen. Authentication is not wired to any backend: choosing Google
/// goes straight to the chat view.
pub fn login_screen(styled: bool) -> Result<LoginChoice> {
    println!("{}\n", render_login(styled));
    let choice = login_outcome(
        Select::new(
            "Acceso seguro y rápido",
            vec![LoginChoice::Google, LoginChoice::Quit],
        )
        .prompt(),
    )?;

    if choice == LoginChoice::Google {
        info!("login selected; no authentication backend configured, entering chat");
    }
    Ok(choice)
}

/// Esc or Ctrl-C at the login prompt means leaving, not failing.
pub fn login_outcome(
    result: std::result::Result<LoginChoice, InquireError>,
) -> Result<LoginChoice> {
    match result {
        Ok(choice) => Ok(choice),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(LoginChoice::Quit)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_header() {
        assert_eq!(
            render_header(false),
            "SostenibiliChat\nAsistente Virtual de Sostenibilidad"
        );
    }

    #[test]
    fn login_choices_read_naturally() {
        assert_eq!(LoginChoice::Google.to_string(), "Iniciar sesión con Google");
        assert_eq!(LoginChoice::Quit.to_string(), "Salir");
        assert!(render_login(false).ends_with(FOOTER));
    }

    #[test]
    fn cancelled_login_quits_quietly() {
        assert_eq!(
            login_outcome(Err(InquireError::OperationCanceled)).unwrap(),
            LoginChoice::Quit
        );
        assert_eq!(
            login_outcome(Err(InquireError::OperationInterrupted)).unwrap(),
            LoginChoice::Quit
        );
        assert_eq!(
            login_outcome(Ok(LoginChoice::Google)).unwrap(),
            LoginChoice::Google
        );
    }

    #[test]
    fn other_prompt_failures_propagate() {
        let err = login_outcome(Err(InquireError::NotTTY)).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Prompt(InquireError::NotTTY)));
    }
}
