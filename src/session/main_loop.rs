use crossterm::{
    cursor::MoveUp,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::cli::actions::{ChatCommand, HELP};
use crate::error::Result;
use crate::models::responder::Responder;
use crate::session::store::ConversationStore;
use crate::ui::bubble::{render_message, render_typing, View};
use crate::ui::header::render_header;
use crate::ui::welcome::{render_welcome, suggestion, SUGGESTIONS};

/// Why the chat view was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Logout,
    Quit,
}

pub struct ChatView {
    pub view: View,
    pub show_welcome: bool,
}

/// Reads lines until logout, exit or end of input.
///
/// Input is only read again after the pending reply has settled, so at most
/// one request is ever in flight.
pub async fn main_loop<R, I, O>(
    responder: &R,
    store: &mut ConversationStore,
    chat: &ChatView,
    input: &mut I,
    out: &mut O,
) -> Result<LoopExit>
where
    R: Responder + ?Sized,
    I: BufRead,
    O: Write,
{
    writeln!(out, "{}\n", render_header(chat.view.styled))?;
    if chat.show_welcome && store.is_empty() {
        writeln!(out, "{}", render_welcome(chat.view.styled))?;
    }

    loop {
        write!(out, "\n>: ")?;
        out.flush()?;

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(out)?;
            return Ok(LoopExit::Quit);
        }
        let Ok(line) = String::from_utf8(raw) else {
            warn!("skipping input line that is not valid UTF-8");
            writeln!(out, "Entrada no válida (UTF-8); escribe el mensaje de nuevo.")?;
            continue;
        };
        let line = line.trim();

        if let Some(command) = line.strip_prefix('/') {
            match ChatCommand::parse(command) {
                ChatCommand::Help => writeln!(out, "{HELP}")?,
                ChatCommand::Welcome => writeln!(out, "{}", render_welcome(chat.view.styled))?,
                ChatCommand::Suggest(n) => match suggestion(n) {
                    Some(s) => exchange(responder, store, chat, s.description, out).await?,
                    None => writeln!(
                        out,
                        "No existe la sugerencia {n}; elige entre 1 y {}.",
                        SUGGESTIONS.len()
                    )?,
                },
                ChatCommand::Logout => {
                    writeln!(out, "Sesión cerrada.")?;
                    return Ok(LoopExit::Logout);
                }
                ChatCommand::Exit => return Ok(LoopExit::Quit),
                ChatCommand::Unknown(name) => {
                    writeln!(out, "Comando desconocido: /{name}")?;
                    writeln!(out, "{HELP}")?;
                }
            }
            continue;
        }

        exchange(responder, store, chat, line, out).await?;
    }
}

async fn exchange<R, O>(
    responder: &R,
    store: &mut ConversationStore,
    chat: &ChatView,
    text: &str,
    out: &mut O,
) -> Result<()>
where
    R: Responder + ?Sized,
    O: Write,
{
    let Some(pending) = store.begin_send(text) else {
        debug!("nothing to send");
        return Ok(());
    };

    if let Some(user) = store.messages().last() {
        writeln!(out, "{}", render_message(user, &chat.view))?;
    }
    writeln!(out, "{}", render_typing(&chat.view))?;
    out.flush()?;

    let result = responder.reply(pending.text()).await;

    if chat.view.styled {
        execute!(out, MoveUp(1), Clear(ClearType::CurrentLine))?;
    }
    let reply = store.settle(pending, result);
    writeln!(out, "{}", render_message(reply, &chat.view))?;
    Ok(())
}
