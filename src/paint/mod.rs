//! Painters
//!
//! A painter projects log entries onto one presentation format. Painting
//! never mutates the log, so the same entries can be painted any number of
//! times with the same result.

pub mod ansi;
pub mod html;

use crate::log::{Content, Entry, LogEntry, Role};
use crate::report::Report;
use crate::table::Table;

pub use ansi::AnsiPainter;
pub use html::HtmlPainter;

pub trait Painter {
    fn user_text(&self, text: &str) -> String;
    fn assistant_text(&self, text: &str) -> String;
    fn table(&self, table: &Table) -> String;
    fn suggestions(&self, items: &[String]) -> String;
    fn report(&self, report: &Report) -> String;

    /// Paint one entry
    fn entry(&self, entry: &Entry) -> String {
        match (&entry.content, entry.role) {
            (Content::Text(text), Role::User) => self.user_text(text),
            (Content::Text(text), Role::Assistant) => self.assistant_text(text),
            (Content::Table(table), _) => self.table(table),
            (Content::Suggestions(items), _) => self.suggestions(items),
            (Content::Report(report), _) => self.report(report),
        }
    }

    /// Paint entries in log order
    fn transcript(&self, entries: &[LogEntry]) -> String {
        entries.iter().map(|e| self.entry(&e.entry)).collect()
    }
}
