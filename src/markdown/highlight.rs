use crossterm::style::{Color, Stylize};
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    Literal,
    String,
    Number,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

struct Language {
    keywords: &'static [&'static str],
    literals: &'static [&'static str],
    comment: &'static str,
    single_quote_strings: bool,
}

const RUST: Language = Language {
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
        "unsafe", "use", "where", "while",
    ],
    literals: &["true", "false", "None", "Some", "Ok", "Err"],
    comment: "//",
    single_quote_strings: false,
};

const PYTHON: Language = Language {
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield",
    ],
    literals: &["True", "False", "None"],
    comment: "#",
    single_quote_strings: true,
};

const JAVASCRIPT: Language = Language {
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "delete", "do", "else", "export", "extends", "finally", "for", "function", "if", "import",
        "in", "instanceof", "interface", "let", "new", "of", "return", "switch", "this", "throw",
        "try", "type", "typeof", "var", "void", "while", "yield",
    ],
    literals: &["true", "false", "null", "undefined"],
    comment: "//",
    single_quote_strings: true,
};

const SQL: Language = Language {
    keywords: &[
        "SELECT", "FROM", "WHERE", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER", "ON", "GROUP",
        "BY", "ORDER", "HAVING", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "CREATE",
        "TABLE", "AS", "AND", "OR", "NOT", "IN", "IS", "LIMIT", "DISTINCT", "CASE", "WHEN",
        "THEN", "ELSE", "END", "UNION", "WITH", "select", "from", "where", "join", "on", "group",
        "by", "order", "as", "and", "or", "not", "in", "limit", "with",
    ],
    literals: &["NULL", "TRUE", "FALSE", "null", "true", "false"],
    comment: "--",
    single_quote_strings: true,
};

const SHELL: Language = Language {
    keywords: &[
        "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac",
        "function", "in", "export", "local", "return",
    ],
    literals: &["true", "false"],
    comment: "#",
    single_quote_strings: true,
};

const JSON: Language = Language {
    keywords: &[],
    literals: &["true", "false", "null"],
    comment: "//",
    single_quote_strings: false,
};

fn language(name: &str) -> Option<&'static Language> {
    match name.to_ascii_lowercase().as_str() {
        "rust" | "rs" => Some(&RUST),
        "python" | "py" => Some(&PYTHON),
        "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => Some(&JAVASCRIPT),
        "sql" => Some(&SQL),
        "bash" | "sh" | "shell" | "zsh" => Some(&SHELL),
        "json" => Some(&JSON),
        _ => None,
    }
}

/// Lexical highlighter for one code block.
pub struct Highlighter {
    lang: &'static Language,
    pattern: Regex,
}

impl Highlighter {
    /// `None` for languages without a keyword table; those render unhighlighted.
    pub fn for_language(name: &str) -> Option<Self> {
        let lang = language(name)?;
        let strings = if lang.single_quote_strings {
            r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#
        } else {
            r#""(?:[^"\\]|\\.)*""#
        };
        let pattern = format!(
            r"(?P<comment>{}.*)|(?P<string>{})|(?P<number>\b\d+(?:\.\d+)?\b)|(?P<word>\b[A-Za-z_][A-Za-z0-9_]*\b)",
            regex::escape(lang.comment),
            strings
        );
        let pattern = Regex::new(&pattern).ok()?;
        Some(Highlighter { lang, pattern })
    }

    /// Splits `line` into classified tokens that concatenate back to `line`.
    pub fn tokens<'a>(&self, line: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for caps in self.pattern.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                tokens.push(Token {
                    kind: TokenKind::Plain,
                    text: &line[last..whole.start()],
                });
            }

            let text = whole.as_str();
            let kind = if caps.name("comment").is_some() {
                TokenKind::Comment
            } else if caps.name("string").is_some() {
                TokenKind::String
            } else if caps.name("number").is_some() {
                TokenKind::Number
            } else if self.lang.keywords.contains(&text) {
                TokenKind::Keyword
            } else if self.lang.literals.contains(&text) {
                TokenKind::Literal
            } else {
                TokenKind::Plain
            };

            tokens.push(Token { kind, text });
            last = whole.end();
        }

        if last < line.len() {
            tokens.push(Token {
                kind: TokenKind::Plain,
                text: &line[last..],
            });
        }
        tokens
    }

    pub fn highlight(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() * 2);
        for token in self.tokens(line) {
            let styled = match token.kind {
                TokenKind::Plain => token.text.with(Color::Grey),
                TokenKind::Keyword => token.text.with(Color::Magenta),
                TokenKind::Literal => token.text.with(Color::Blue),
                TokenKind::String => token.text.with(Color::Green),
                TokenKind::Number => token.text.with(Color::Yellow),
                TokenKind::Comment => token.text.with(Color::DarkGrey).italic(),
            };
            out.push_str(&styled.to_string());
        }
        out
    }
}
