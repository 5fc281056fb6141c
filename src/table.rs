//! Hospital tables
//!
//! Typed table model plus the builders for each table the assistant shows.
//! Cells may contain `**bold**` markup and line breaks; painters handle both.

use crate::api::{Hospital, HospitalQuote};

/// Rows shown in the ranked table inside an analysis report
pub const RANKED_ROWS: usize = 5;
/// Rows shown in the in-network listing
pub const NETWORK_ROWS: usize = 8;

const MAX_NAME_CHARS: usize = 25;
const TRUNCATED_NAME_CHARS: usize = 22;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    /// Marks the best option
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Footer lines shown under the table
    pub notes: Vec<String>,
}

impl Table {
    fn new(title: Option<String>, columns: &[&str]) -> Self {
        Self {
            title,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn push(&mut self, cells: Vec<String>, highlight: bool) {
        self.rows.push(Row { cells, highlight });
    }
}

/// Format a dollar amount with thousands separators and at most two decimals
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match frac {
        0 => format!("{}${}", sign, grouped),
        f if f % 10 == 0 => format!("{}${}.{}", sign, grouped, f / 10),
        f => format!("{}${}.{:02}", sign, grouped, f),
    }
}

/// Format a rating without a trailing `.0`
pub fn rating(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn yes_no(emergency: bool) -> String {
    if emergency { "✅ Yes" } else { "❌ No" }.to_string()
}

fn short_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let head: String = name.chars().take(TRUNCATED_NAME_CHARS).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Side-by-side price comparison for a set of procedures
pub fn comparison_table(quotes: &[HospitalQuote], procedures: &[String]) -> Table {
    let title = format!(
        "🏥 **Hospital Price Comparison** for {}:",
        procedures.join(", ")
    );
    let mut table = Table::new(
        Some(title),
        &["Hospital", "Rating", "Wait Time", "Total Cost", "Cash Price", "Savings", "Emergency"],
    );

    for quote in quotes {
        let h = &quote.hospital;
        table.push(
            vec![
                format!("**{}**\n{}\n📞 {}", h.name, h.address, h.phone),
                format!("⭐ {}/5", rating(h.rating)),
                quote.wait_time_label(),
                money(quote.total_cost),
                money(quote.total_cash_cost),
                money(quote.total_savings_cash),
                yes_no(h.emergency),
            ],
            false,
        );
    }

    if let Some(best) = quotes.first() {
        table.notes.push(format!(
            "💡 **Best Value:** {} offers the lowest total cost at {} (cash price)",
            best.hospital.name,
            money(best.total_cash_cost)
        ));
    }

    table
}

/// Ranked top-five table, the best hospital's procedure breakdown, and a
/// savings summary. Quotes are expected cheapest first.
pub fn ranked_tables(quotes: &[HospitalQuote]) -> Vec<Table> {
    let Some(best) = quotes.first() else {
        return Vec::new();
    };

    let mut ranked = Table::new(
        Some("🏥 Hospital Comparison Results".to_string()),
        &["Rank", "Hospital Name", "Cash Price", "Rating", "Wait Time", "Emergency", "Contact"],
    );
    for (i, quote) in quotes.iter().take(RANKED_ROWS).enumerate() {
        let h = &quote.hospital;
        ranked.push(
            vec![
                (i + 1).to_string(),
                format!("{}\n{}", short_name(&h.name), h.address),
                money(quote.total_cash_cost),
                format!("⭐ {}", rating(h.rating)),
                format!("{}min", h.average_wait_time),
                if h.emergency { "🚨 YES" } else { "❌ NO" }.to_string(),
                format!("📞 {}", h.phone),
            ],
            i == 0,
        );
    }

    let mut tables = vec![ranked];

    if !best.procedures.is_empty() {
        let mut breakdown = Table::new(
            Some(format!("💊 Procedure Breakdown - {}", best.hospital.name)),
            &["Procedure", "Base Price", "Cash Price", "Savings"],
        );
        for proc in &best.procedures {
            breakdown.push(
                vec![
                    proc.procedure.clone(),
                    money(proc.base_price),
                    money(proc.cash_price),
                    money(proc.savings_cash),
                ],
                false,
            );
        }
        tables.push(breakdown);
    }

    // The last quote is the most expensive
    let worst = quotes.last().unwrap_or(best);
    let summary = [
        format!(
            "💡 **Best Value:** {} - {}",
            best.hospital.name,
            money(best.total_cash_cost)
        ),
        format!(
            "💰 **Potential Savings:** Up to {}",
            money(worst.total_cash_cost - best.total_cash_cost)
        ),
    ];
    if let Some(last) = tables.last_mut() {
        last.notes.extend(summary);
    }

    tables
}

/// In-network hospitals for an insurance plan in one city
pub fn network_table(hospitals: &[Hospital], location: &str) -> Table {
    let mut table = Table::new(
        Some(format!("🏥 **In-Network Hospitals in {}:**", location)),
        &["Hospital Name", "Rating", "Phone", "Emergency", "Address"],
    );

    for h in hospitals.iter().take(NETWORK_ROWS) {
        table.push(
            vec![
                format!("**{}**", h.name),
                format!("⭐ {}/5", rating(h.rating)),
                format!("📞 {}", h.phone),
                yes_no(h.emergency),
                h.address.clone(),
            ],
            false,
        );
    }

    table.notes.push(
        "💡 **Tip:** Call ahead to verify network participation and get current pricing."
            .to_string(),
    );
    table
}
