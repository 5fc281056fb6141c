//! Inline markup shared by every painter
//!
//! The backend writes `**bold**` in message text. Parsing happens once here;
//! painters only ever see spans.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));

/// A run of text with one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(t) | Span::Bold(t) => t,
        }
    }
}

/// Split a line into plain and bold spans. Unclosed `**` stays literal.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Span::Plain(text[last..whole.start()].to_string()));
        }
        spans.push(Span::Bold(caps[1].to_string()));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::Plain(text[last..].to_string()));
    }

    spans
}

/// Text with markup removed
pub fn strip_markup(text: &str) -> String {
    BOLD.replace_all(text, "$1").into_owned()
}
