//! Terminal painter
//!
//! Simple, tasteful ANSI colors. With color off the same layout is produced
//! as plain text.

use super::Painter;
use crate::markup::{Span, parse_inline, strip_markup};
use crate::report::{Report, Section};
use crate::table::{Row, Table};

/// ANSI escape codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub const BRIGHT_GREEN: &str = "\x1b[92m";
}

use codes::*;

#[derive(Debug, Clone, Copy)]
pub struct AnsiPainter {
    color: bool,
}

impl Default for AnsiPainter {
    fn default() -> Self {
        Self { color: true }
    }
}

impl AnsiPainter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn style(&self, codes: &[&str], text: &str) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", codes.concat(), text, RESET)
    }

    /// Format a status/info message (gray)
    pub fn status(&self, msg: &str) -> String {
        self.style(&[GRAY], msg)
    }

    /// Format an error message (red)
    pub fn error(&self, msg: &str) -> String {
        self.style(&[RED], msg)
    }

    /// Format a warning message (yellow)
    pub fn warning(&self, msg: &str) -> String {
        self.style(&[YELLOW], msg)
    }

    /// Format a success message (green)
    pub fn success(&self, msg: &str) -> String {
        self.style(&[GREEN], msg)
    }

    /// Format the prompt
    pub fn prompt(&self) -> String {
        self.style(&[BOLD, MAGENTA], "you> ")
    }

    /// Format the continuation prompt
    pub fn continuation_prompt(&self) -> String {
        self.style(&[BOLD, MAGENTA], " ... ")
    }

    /// Format startup banner line
    pub fn banner_line(&self, label: &str, value: &str) -> String {
        format!("{} {}", self.style(&[DIM], &format!("{:<12}", label)), value)
    }

    /// Format startup banner with accent
    pub fn banner_accent(&self, text: &str) -> String {
        self.style(&[BOLD, MAGENTA], text)
    }

    /// Format a horizontal separator
    pub fn separator(&self, width: usize) -> String {
        self.style(&[DIM], &"─".repeat(width))
    }

    /// One line with `**bold**` spans styled, on top of `base`
    fn inline(&self, line: &str, base: &[&str]) -> String {
        parse_inline(line)
            .iter()
            .map(|span| match span {
                Span::Plain(t) => self.style(base, t),
                Span::Bold(t) => {
                    let mut codes = base.to_vec();
                    codes.push(BOLD);
                    self.style(&codes, t)
                }
            })
            .collect()
    }

    fn lines(&self, text: &str, base: &[&str]) -> String {
        let mut out = String::new();
        for line in text.lines() {
            out.push_str(&self.inline(line, base));
            out.push('\n');
        }
        out
    }

    fn section(&self, section: &Section) -> String {
        let mut out = self.inline(&section.heading, &[BOLD]);
        out.push('\n');
        for line in &section.lines {
            out.push_str(&self.inline(line, &[]));
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn row(&self, row: &Row, widths: &[usize]) -> String {
        let split: Vec<Vec<&str>> = row.cells.iter().map(|c| c.lines().collect()).collect();
        let height = split.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let base: &[&str] = if row.highlight { &[BRIGHT_GREEN] } else { &[] };

        let mut out = String::new();
        for line_no in 0..height {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(col, width)| {
                    let text = split
                        .get(col)
                        .and_then(|lines| lines.get(line_no))
                        .copied()
                        .unwrap_or("");
                    let pad = width.saturating_sub(visible_width(text));
                    format!("{}{}", self.inline(text, base), " ".repeat(pad))
                })
                .collect();
            let sep = format!(" {} ", self.border("│"));
            out.push_str(&format!(" {} \n", cells.join(sep.as_str())));
        }
        out
    }

    fn border(&self, s: &str) -> String {
        self.style(&[DIM], s)
    }
}

/// Display width of a cell line once markup is removed
fn visible_width(text: &str) -> usize {
    strip_markup(text).chars().count()
}

fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| visible_width(c)).collect();
    for row in &table.rows {
        for (col, cell) in row.cells.iter().enumerate() {
            let longest = cell.lines().map(visible_width).max().unwrap_or(0);
            match widths.get_mut(col) {
                Some(w) => *w = (*w).max(longest),
                None => widths.push(longest),
            }
        }
    }
    widths
}

impl Painter for AnsiPainter {
    fn user_text(&self, text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            out.push_str(&self.style(&[GRAY], "› "));
            out.push_str(&self.inline(line, &[GRAY]));
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn assistant_text(&self, text: &str) -> String {
        let mut out = self.lines(text, &[]);
        out.push('\n');
        out
    }

    fn table(&self, table: &Table) -> String {
        let widths = column_widths(table);
        let mut out = String::new();

        if let Some(title) = &table.title {
            out.push_str(&self.lines(title, &[]));
            out.push('\n');
        }

        let header = Row {
            cells: table.columns.clone(),
            highlight: false,
        };
        for line in self.row(&header, &widths).lines() {
            out.push_str(&self.style(&[BOLD], line));
            out.push('\n');
        }

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        out.push_str(&self.border(&rule.join("┼")));
        out.push('\n');

        for row in &table.rows {
            out.push_str(&self.row(row, &widths));
        }

        if !table.notes.is_empty() {
            out.push('\n');
            for note in &table.notes {
                out.push_str(&self.lines(note, &[]));
            }
        }
        out.push('\n');
        out
    }

    fn suggestions(&self, items: &[String]) -> String {
        let mut out = self.status("Suggestions (type a number to send):");
        out.push('\n');
        for (i, item) in items.iter().enumerate() {
            out.push_str(&format!(
                "  {} {}\n",
                self.style(&[CYAN], &format!("[{}]", i + 1)),
                item
            ));
        }
        out.push('\n');
        out
    }

    fn report(&self, report: &Report) -> String {
        let mut out = String::new();
        for line in &report.header {
            out.push_str(&self.inline(line, &[BOLD]));
            out.push('\n');
        }
        if !report.header.is_empty() {
            out.push_str(&self.separator(40));
            out.push_str("\n\n");
        }

        for section in report.leading_sections() {
            out.push_str(&self.section(section));
        }
        for table in &report.tables {
            out.push_str(&self.table(table));
        }
        for section in report.trailing_sections() {
            out.push_str(&self.section(section));
        }
        out
    }
}
