//! HTML painter
//!
//! Produces the same fragments the web widget renders. All message text is
//! escaped before markup is applied.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::Painter;
use crate::markup::{Span, parse_inline};
use crate::report::{Report, Section, SectionKind};
use crate::table::Table;

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPainter;

/// Escaped text with bold spans and `<br>` line breaks
fn rich(text: &str) -> String {
    text.lines()
        .map(|line| {
            parse_inline(line)
                .iter()
                .map(|span| match span {
                    Span::Plain(t) => encode_text(t).into_owned(),
                    Span::Bold(t) => format!("<strong>{}</strong>", encode_text(t)),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

fn section_class(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::ExecutiveSummary => "executive-summary",
        SectionKind::HospitalComparison => "hospital-comparison",
        SectionKind::InsuranceImpact => "insurance-impact",
        SectionKind::RecommendedActions => "recommended-actions",
    }
}

fn section(section: &Section) -> String {
    format!(
        "<div class=\"report-section {}\"><h4>{}</h4><p>{}</p></div>",
        section_class(section.kind),
        rich(&section.heading),
        rich(&section.lines.join("\n"))
    )
}

fn table_body(table: &Table) -> String {
    let mut out = String::new();
    if let Some(title) = &table.title {
        out.push_str(&format!("<p class=\"table-title\">{}</p>", rich(title)));
    }

    out.push_str("<table class=\"comparison-table\"><thead><tr>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", encode_text(column)));
    }
    out.push_str("</tr></thead><tbody>");

    for row in &table.rows {
        if row.highlight {
            out.push_str("<tr class=\"best-option\">");
        } else {
            out.push_str("<tr>");
        }
        for cell in &row.cells {
            out.push_str(&format!("<td>{}</td>", rich(cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");

    for note in &table.notes {
        out.push_str(&format!("<p class=\"table-note\">{}</p>", rich(note)));
    }
    out
}

impl Painter for HtmlPainter {
    fn user_text(&self, text: &str) -> String {
        format!("<div class=\"message user\">{}</div>\n", rich(text))
    }

    fn assistant_text(&self, text: &str) -> String {
        format!("<div class=\"message bot\">{}</div>\n", rich(text))
    }

    fn table(&self, table: &Table) -> String {
        format!("<div class=\"message bot\">{}</div>\n", table_body(table))
    }

    fn suggestions(&self, items: &[String]) -> String {
        let buttons: String = items
            .iter()
            .map(|item| {
                format!(
                    "<button class=\"suggestion-btn\" data-message=\"{}\">{}</button>",
                    encode_double_quoted_attribute(item),
                    encode_text(item)
                )
            })
            .collect();
        format!("<div class=\"suggestions\">{}</div>\n", buttons)
    }

    fn report(&self, report: &Report) -> String {
        let mut out = String::from("<div class=\"message bot report\">");

        if !report.header.is_empty() {
            out.push_str(&format!(
                "<div class=\"report-header\">{}</div>",
                rich(&report.header.join("\n"))
            ));
        }
        for s in report.leading_sections() {
            out.push_str(&section(s));
        }
        for table in &report.tables {
            out.push_str(&table_body(table));
        }
        for s in report.trailing_sections() {
            out.push_str(&section(s));
        }

        out.push_str("</div>\n");
        out
    }
}
