//! Append-only message log
//!
//! Everything the user sees is an [`Entry`] in a [`MessageLog`]. Entries are
//! never reordered or removed; painters project them to a presentation
//! format without touching the log.

use chrono::{DateTime, Utc};

use crate::report::Report;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Message text, may contain `**bold**` markup and line breaks
    Text(String),
    /// A caption-bearing table; shown without typing effect
    Table(Table),
    /// Quick replies the user can send back
    Suggestions(Vec<String>),
    /// A sectioned price-analysis report
    Report(Report),
}

/// What was said, by whom
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub role: Role,
    pub content: Content,
}

impl Entry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Text(text.into()),
        }
    }

    pub fn table(table: Table) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Table(table),
        }
    }

    pub fn suggestions(items: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Suggestions(items),
        }
    }

    pub fn report(report: Report) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Report(report),
        }
    }

    /// Whether the typing effect applies when this entry is shown
    pub fn is_typed(&self) -> bool {
        self.role == Role::Assistant && matches!(self.content, Content::Text(_))
    }
}

/// An entry as stored, with its position and arrival time
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub entry: Entry,
}

#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, returning its sequence number
    pub fn append(&mut self, entry: Entry) -> u64 {
        let seq = self.entries.len() as u64;
        self.entries.push(LogEntry {
            seq,
            at: Utc::now(),
            entry,
        });
        seq
    }

    /// Append entries in order
    pub fn extend(&mut self, entries: impl IntoIterator<Item = Entry>) {
        for entry in entries {
            self.append(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended at or after `seq`
    pub fn since(&self, seq: u64) -> &[LogEntry] {
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }

    /// Suggestions from the most recent suggestion entry
    pub fn latest_suggestions(&self) -> Option<&[String]> {
        self.entries.iter().rev().find_map(|e| match &e.entry.content {
            Content::Suggestions(items) => Some(items.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_increasing_seq() {
        let mut log = MessageLog::new();
        assert_eq!(log.append(Entry::user("hi")), 0);
        assert_eq!(log.append(Entry::assistant("hello")), 1);
        assert_eq!(log.len(), 2);
        assert!(log.entries()[0].at <= log.entries()[1].at);
    }

    #[test]
    fn test_since() {
        let mut log = MessageLog::new();
        log.extend([Entry::user("a"), Entry::assistant("b"), Entry::assistant("c")]);
        assert_eq!(log.since(1).len(), 2);
        assert_eq!(log.since(1)[0].entry, Entry::assistant("b"));
        assert!(log.since(10).is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut log = MessageLog::new();
        log.append(Entry::assistant("same"));
        log.append(Entry::assistant("same"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].entry, log.entries()[1].entry);
    }

    #[test]
    fn test_latest_suggestions() {
        let mut log = MessageLog::new();
        assert!(log.latest_suggestions().is_none());
        log.append(Entry::suggestions(vec!["a".into()]));
        log.append(Entry::assistant("text"));
        log.append(Entry::suggestions(vec!["b".into(), "c".into()]));
        log.append(Entry::user("typed"));
        assert_eq!(log.latest_suggestions().unwrap(), ["b", "c"]);
    }

    #[test]
    fn test_is_typed() {
        assert!(Entry::assistant("x").is_typed());
        assert!(!Entry::user("x").is_typed());
        assert!(!Entry::suggestions(vec![]).is_typed());
    }
}
