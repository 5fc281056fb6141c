//! Sectioned price-analysis reports
//!
//! Professional analysis replies arrive as one long message with uppercase
//! section headings. The message is parsed once, line by line, into a
//! [`Report`]; the hospital comparison section is dropped because the typed
//! ranked table replaces it.

use crate::api::HospitalQuote;
use crate::table::{Table, ranked_tables};

/// Only this many leading lines can contribute to the header
const HEADER_SCAN_LINES: usize = 5;

const HEADER_MARKERS: &[&str] = &[
    "HEALTHCARE PRICE ANALYSIS",
    "Procedure(s):",
    "Insurance:",
    "Report Date:",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    ExecutiveSummary,
    HospitalComparison,
    InsuranceImpact,
    RecommendedActions,
}

impl SectionKind {
    const ALL: [SectionKind; 4] = [
        SectionKind::ExecutiveSummary,
        SectionKind::HospitalComparison,
        SectionKind::InsuranceImpact,
        SectionKind::RecommendedActions,
    ];

    fn marker(self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "EXECUTIVE SUMMARY",
            SectionKind::HospitalComparison => "DETAILED HOSPITAL COMPARISON",
            SectionKind::InsuranceImpact => "INSURANCE IMPACT ANALYSIS",
            SectionKind::RecommendedActions => "RECOMMENDED ACTIONS",
        }
    }

    fn of_heading(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| line.contains(k.marker()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    /// The heading line as written, markup included
    pub heading: String,
    pub lines: Vec<String>,
}

/// A parsed analysis message plus the tables rendered between its sections
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub header: Vec<String>,
    pub sections: Vec<Section>,
    pub tables: Vec<Table>,
}

impl Report {
    /// Parse `message` and attach ranked tables for `quotes`
    pub fn build(message: &str, quotes: &[HospitalQuote]) -> Self {
        let mut report = Self::parse(message);
        report.tables = ranked_tables(quotes);
        report
    }

    /// Parse the text of an analysis message
    pub fn parse(message: &str) -> Self {
        let header = message
            .lines()
            .take(HEADER_SCAN_LINES)
            .filter(|line| HEADER_MARKERS.iter().any(|m| line.contains(m)))
            .map(str::to_string)
            .collect();

        let mut sections: Vec<Section> = Vec::new();
        for line in message.lines() {
            if let Some(kind) = SectionKind::of_heading(line) {
                sections.push(Section {
                    kind,
                    heading: line.to_string(),
                    lines: Vec::new(),
                });
            } else if let Some(current) = sections.last_mut() {
                current.lines.push(line.to_string());
            }
        }

        for section in &mut sections {
            while section.lines.last().is_some_and(|l| l.trim().is_empty()) {
                section.lines.pop();
            }
        }
        sections.retain(|s| s.kind != SectionKind::HospitalComparison);

        Self {
            header,
            sections,
            tables: Vec::new(),
        }
    }

    /// Section by kind, if the message had one
    #[cfg(test)]
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Sections painted before the tables
    pub fn leading_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| s.kind == SectionKind::ExecutiveSummary)
    }

    /// Sections painted after the tables
    pub fn trailing_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| s.kind != SectionKind::ExecutiveSummary)
    }
}
