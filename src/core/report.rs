//! Report formatter
//!
//! Renders a `RankedReport` as a Telegram HTML message.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::core::types::{ArbitrageOpportunity, RankedReport};

/// Escape the characters Telegram's HTML parse mode treats as markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Four-line block for one opportunity
fn format_opportunity(report: &RankedReport, op: &ArbitrageOpportunity) -> String {
    format!(
        "<b>{}</b>\n{} ({}): {:+.4}%\n{} ({}): {:+.4}%\nDifference: {:.4}%",
        escape_html(&op.symbol),
        report.exchange_a,
        op.direction_a,
        op.rate_a,
        report.exchange_b,
        op.direction_b,
        op.rate_b,
        op.spread
    )
}

/// Render the report, or `None` when there is nothing to send.
pub fn format_report<Tz>(report: &RankedReport, generated_at: &DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if report.is_empty() {
        return None;
    }

    let header = format!(
        "🔄 Top {} arbitrage opportunities (time: {}):",
        report.len(),
        generated_at.format("%H:%M:%S")
    );
    let body: Vec<String> = report
        .opportunities
        .iter()
        .map(|op| format_opportunity(report, op))
        .collect();

    Some(format!("{}\n\n{}", header, body.join("\n\n")))
}
