use crossterm::style::{Color, Stylize};

use crate::markdown::render::render_markdown;
use crate::session::message::Message;

pub const USER_LABEL: &str = "Tú";
pub const ASSISTANT_LABEL: &str = "Asistente";
pub const TYPING_TEXT: &str = "Escribiendo...";

/// How a conversation gets drawn on this terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub styled: bool,
    pub width: usize,
}

impl View {
    pub fn detect(styled: bool) -> Self {
        let width = crossterm::terminal::size()
            .map(|(cols, _)| usize::from(cols))
            .unwrap_or(80)
            .max(40);
        View { styled, width }
    }

    fn right(&self, line: &str, visible: usize) -> String {
        let pad = self.width.saturating_sub(visible);
        format!("{}{}", " ".repeat(pad), line)
    }
}

pub fn render_message(message: &Message, view: &View) -> String {
    if message.is_user {
        render_user(message, view)
    } else {
        render_assistant(message, view)
    }
}

// user text is shown verbatim, right-aligned
fn render_user(message: &Message, view: &View) -> String {
    let mut lines = Vec::new();

    let label = format!("{USER_LABEL} ●");
    let visible = label.chars().count();
    let label = if view.styled {
        label.with(Color::Green).bold().to_string()
    } else {
        label
    };
    lines.push(view.right(&label, visible));

    for line in message.text.lines() {
        lines.push(view.right(line, line.chars().count()));
    }

    let stamp = timestamp(&message.timestamp, view);
    lines.push(view.right(&stamp, message.timestamp.chars().count()));
    lines.join("\n")
}

fn render_assistant(message: &Message, view: &View) -> String {
    let mut out = assistant_label(view);
    out.push('\n');
    out.push_str(&render_markdown(&message.text, view.styled));
    out.push('\n');
    out.push_str(&timestamp(&message.timestamp, view));
    out
}

fn assistant_label(view: &View) -> String {
    let label = format!("● {ASSISTANT_LABEL}");
    if view.styled {
        label.with(Color::Cyan).bold().to_string()
    } else {
        label
    }
}

fn timestamp(stamp: &str, view: &View) -> String {
    if view.styled {
        stamp.with(Color::DarkGrey).to_string()
    } else {
        stamp.to_string()
    }
}

pub fn render_typing(view: &View) -> String {
    let text = if view.styled {
        TYPING_TEXT.with(Color::DarkGrey).italic().to_string()
    } else {
        TYPING_TEXT.to_string()
    };
    format!("{} {}", assistant_label(view), text)
}
