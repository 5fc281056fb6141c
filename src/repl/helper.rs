//! Rustyline helper for the REPL with tab completion and hints

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// Slash commands for tab completion
pub const SLASH_COMMANDS: &[&str] = &[
    "/help",
    "/version",
    "/symptoms",
    "/compare",
    "/plans",
    "/locate",
    "/insurance",
    "/intake",
    "/history",
    "/quit",
    "/exit",
];

/// Custom helper for rustyline with completion and hints
pub struct FinHealthHelper {
    hinter: HistoryHinter,
    color: bool,
}

impl FinHealthHelper {
    pub fn new(color: bool) -> Self {
        Self {
            hinter: HistoryHinter::new(),
            color,
        }
    }
}

/// Slash commands starting with the first word of `line`
fn matching_commands(line: &str) -> Vec<&'static str> {
    let word = line.split_whitespace().next().unwrap_or("");
    SLASH_COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(word))
        .collect()
}

impl Completer for FinHealthHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete slash commands at the start of the line
        if line.starts_with('/') && pos <= line.find(' ').unwrap_or(line.len()) {
            let matches = matching_commands(line)
                .into_iter()
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, matches))
        } else {
            Ok((pos, vec![]))
        }
    }
}

impl Hinter for FinHealthHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        // History hints only for free text
        if !line.starts_with('/') {
            self.hinter.hint(line, pos, ctx)
        } else {
            None
        }
    }
}

impl Highlighter for FinHealthHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if self.color {
            Cow::Owned(format!("\x1b[2m{}\x1b[0m", hint))
        } else {
            Cow::Borrowed(hint)
        }
    }
}

impl Validator for FinHealthHelper {}

impl Helper for FinHealthHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_commands() {
        assert_eq!(matching_commands("/in"), vec!["/insurance", "/intake"]);
        assert_eq!(matching_commands("/quit now"), vec!["/quit"]);
        assert_eq!(matching_commands("/").len(), SLASH_COMMANDS.len());
        assert!(matching_commands("/nope").is_empty());
    }
}
