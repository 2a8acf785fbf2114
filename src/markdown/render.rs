//! Markdown to terminal text.
//!
//! Parsing is left to `pulldown-cmark`; this module only decides how each
//! element looks in a terminal. With `styled == false` the output carries no
//! ANSI escapes, which is what pipes and the tests see.

use crossterm::style::{Color, ContentStyle, Stylize};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::markdown::highlight::Highlighter;

const RULE: &str = "────────────────────────────────────────";
const QUOTE_BAR: &str = "▎ ";
const INDENT: &str = "   ";

enum Frame {
    Paragraph,
    Heading(HeadingLevel),
    Quote,
    List,
    Item,
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, text: String },
    CodeBlock,
    Other,
}

struct ListState {
    next: Option<u64>,
}

struct CodeBuffer {
    lang: String,
    text: String,
}

struct Renderer {
    styled: bool,
    out: String,
    frames: Vec<Frame>,
    lists: Vec<ListState>,
    quote_depth: usize,
    code: Option<CodeBuffer>,
}

pub fn render_markdown(text: &str, styled: bool) -> String {
    let mut renderer = Renderer {
        styled,
        out: String::new(),
        frames: Vec::new(),
        lists: Vec::new(),
        quote_depth: 0,
        code: None,
    };
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH);
    for event in parser {
        renderer.event(event);
    }
    renderer.finish()
}

impl Renderer {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.text.push_str(&text);
                } else {
                    self.write_inline(&text);
                }
            }
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.write_inline(&html),
            Event::SoftBreak => self.write_inline(" "),
            Event::HardBreak => self.out.push('\n'),
            Event::Rule => {
                self.block_gap();
                let rule = self.paint(RULE, ContentStyle::new().with(Color::DarkGrey));
                self.write_raw(&rule);
                self.out.push('\n');
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                if !self.in_fresh_item() {
                    self.block_gap();
                }
                Frame::Paragraph
            }
            Tag::Heading { level, .. } => {
                self.block_gap();
                Frame::Heading(level)
            }
            Tag::BlockQuote(_) => {
                self.block_gap();
                self.quote_depth += 1;
                Frame::Quote
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else {
                    self.ensure_newline();
                }
                self.lists.push(ListState { next: start });
                Frame::List
            }
            Tag::Item => {
                self.ensure_newline();
                self.bullet();
                Frame::Item
            }
            Tag::CodeBlock(kind) => {
                self.block_gap();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some(CodeBuffer {
                    lang,
                    text: String::new(),
                });
                Frame::CodeBlock
            }
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Strikethrough,
            Tag::Link { dest_url, .. } => Frame::Link {
                url: dest_url.to_string(),
                text: String::new(),
            },
            _ => Frame::Other,
        };
        self.frames.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match frame {
            Frame::Paragraph | Frame::Heading(_) | Frame::Item => self.ensure_newline(),
            Frame::Quote => {
                self.ensure_newline();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            Frame::List => {
                self.ensure_newline();
                self.lists.pop();
            }
            Frame::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.code_block(code);
                }
            }
            Frame::Link { url, text } => self.link_target(&url, &text),
            Frame::Emphasis | Frame::Strong | Frame::Strikethrough | Frame::Other => {}
        }
    }

    fn finish(mut self) -> String {
        let trimmed = self.out.trim_end_matches('\n').len();
        self.out.truncate(trimmed);
        self.out
    }

    fn inline_style(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        for frame in &self.frames {
            style = match frame {
                Frame::Heading(level) => {
                    let style = style.bold();
                    if matches!(level, HeadingLevel::H1 | HeadingLevel::H2) {
                        style.with(Color::Cyan).underlined()
                    } else {
                        style.with(Color::Cyan)
                    }
                }
                Frame::Strong => style.bold(),
                Frame::Emphasis => style.italic().with(Color::DarkGrey),
                Frame::Strikethrough => style.crossed_out(),
                Frame::Link { .. } => style.with(Color::Blue).underlined(),
                _ => style,
            };
        }
        style
    }

    fn paint(&self, text: &str, style: ContentStyle) -> String {
        if self.styled {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    fn ensure_newline(&mut self) {
        if !self.at_line_start() {
            self.out.push('\n');
        }
    }

    /// Blank line between blocks, collapsed at the start of output and inside lists.
    fn block_gap(&mut self) {
        self.ensure_newline();
        if self.out.is_empty() || self.out.ends_with("\n\n") || !self.lists.is_empty() {
            return;
        }
        self.out.push('\n');
    }

    fn in_fresh_item(&self) -> bool {
        matches!(self.frames.last(), Some(Frame::Item)) && !self.at_line_start()
    }

    fn line_prefix(&self) -> String {
        let mut prefix = QUOTE_BAR.repeat(self.quote_depth);
        prefix.push_str(&INDENT.repeat(self.lists.len()));
        prefix
    }

    fn write_raw(&mut self, text: &str) {
        if self.at_line_start() {
            let prefix = self.line_prefix();
            self.out.push_str(&prefix);
        }
        self.out.push_str(text);
    }

    // unstyled text of the innermost open link
    fn record_link_text(&mut self, text: &str) {
        let open = self.frames.iter_mut().rev().find_map(|frame| match frame {
            Frame::Link { text: buf, .. } => Some(buf),
            _ => None,
        });
        if let Some(link_text) = open {
            link_text.push_str(text);
        }
    }

    fn write_inline(&mut self, text: &str) {
        self.record_link_text(text);
        let style = self.inline_style();
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            if piece.is_empty() {
                continue;
            }
            let painted = self.paint(piece, style);
            self.write_raw(&painted);
        }
    }

    fn bullet(&mut self) {
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(ListState { next: Some(n) }) => {
                let marker = format!("{n}. ");
                *n += 1;
                marker
            }
            _ => "• ".to_string(),
        };
        let mut prefix = QUOTE_BAR.repeat(self.quote_depth);
        prefix.push_str(&INDENT.repeat(depth));
        self.out.push_str(&prefix);
        let marker = self.paint(&marker, ContentStyle::new().with(Color::Cyan));
        self.out.push_str(&marker);
    }

    fn inline_code(&mut self, code: &str) {
        self.record_link_text(code);
        if self.styled {
            let painted = self.paint(
                &format!(" {code} "),
                ContentStyle::new().with(Color::Yellow).on(Color::DarkGrey),
            );
            self.write_raw(&painted);
        } else {
            self.write_raw(&format!("`{code}`"));
        }
    }

    fn link_target(&mut self, url: &str, text: &str) {
        if url.is_empty() || text.trim() == url {
            return;
        }
        let painted = self.paint(&format!(" ({url})"), ContentStyle::new().with(Color::DarkGrey));
        self.write_raw(&painted);
    }

    fn code_block(&mut self, code: CodeBuffer) {
        let frame_style = ContentStyle::new().with(Color::DarkGrey);
        let header = if code.lang.is_empty() {
            "╭─".to_string()
        } else {
            format!("╭─ {}", code.lang)
        };
        let header = self.paint(&header, frame_style);
        self.write_raw(&header);
        self.out.push('\n');

        let highlighter = if self.styled {
            Highlighter::for_language(&code.lang)
        } else {
            None
        };
        let body = code.text.strip_suffix('\n').unwrap_or(&code.text);
        let gutter = self.paint("│ ", frame_style);
        for line in body.split('\n') {
            let line = match &highlighter {
                Some(h) => h.highlight(line),
                None => line.to_string(),
            };
            self.write_raw(&gutter);
            self.out.push_str(line.trim_end());
            self.out.push('\n');
        }

        let footer = self.paint("╰─", frame_style);
        self.write_raw(&footer);
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> String {
        render_markdown(text, false)
    }

    #[test]
    fn paragraphs_are_separated_by_blank_line() {
        assert_eq!(plain("Hola.\n\nAdiós."), "Hola.\n\nAdiós.");
    }

    #[test]
    fn soft_break_joins_lines() {
        assert_eq!(plain("una\nfrase"), "una frase");
    }

    #[test]
    fn heading_then_list() {
        let text = "### KPI Local\n\n- energía\n- agua\n";
        assert_eq!(plain(text), "KPI Local\n\n• energía\n• agua");
    }

    #[test]
    fn ordered_list_honors_start() {
        assert_eq!(plain("3. tres\n4. cuatro"), "3. tres\n4. cuatro");
    }

    #[test]
    fn nested_list_is_indented() {
        let text = "- padre\n  - hijo\n- otro";
        assert_eq!(plain(text), "• padre\n   • hijo\n• otro");
    }

    #[test]
    fn inline_markup_in_plain_mode() {
        assert_eq!(
            plain("usa **negrita**, *cursiva* y `kpi_total`"),
            "usa negrita, cursiva y `kpi_total`"
        );
    }

    #[test]
    fn links_show_their_target() {
        assert_eq!(
            plain("ver [docs](https://example.com/kpi)"),
            "ver docs (https://example.com/kpi)"
        );
        assert_eq!(plain("<https://example.com>"), "https://example.com");
    }

    #[test]
    fn styled_autolink_prints_url_once() {
        let styled = render_markdown("<https://example.com>", true);
        assert_eq!(styled.matches("https://example.com").count(), 1);

        let named = render_markdown("[docs](https://example.com)", true);
        assert_eq!(named.matches("https://example.com").count(), 1);
        assert!(named.contains("docs"));
    }

    #[test]
    fn fenced_code_block_keeps_lines() {
        let text = "Ejemplo:\n\n```sql\nSELECT *\n  FROM t\n```\n\nFin.";
        assert_eq!(
            plain(text),
            "Ejemplo:\n\n╭─ sql\n│ SELECT *\n│   FROM t\n╰─\n\nFin."
        );
    }

    #[test]
    fn block_quote_has_bar() {
        assert_eq!(plain("> cita"), "▎ cita");
    }

    #[test]
    fn rule_between_paragraphs() {
        assert_eq!(plain("a\n\n---\n\nb"), format!("a\n\n{RULE}\n\nb"));
    }

    #[test]
    fn styled_output_carries_escapes() {
        let styled = render_markdown("**fuerte**", true);
        assert!(styled.contains('\u{1b}'));
        assert!(styled.contains("fuerte"));
        assert!(!plain("**fuerte**").contains('\u{1b}'));
    }
}
