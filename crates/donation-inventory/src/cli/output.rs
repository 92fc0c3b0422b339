//! Text rendering for donation listings, summaries and statistics.

use std::fmt::Write as _;

use crate::donation::{DonationRecord, DonationType};
use crate::views::{Statistics, Summary};

/// Shown in place of a listing with no rows.
pub const EMPTY_LIST_MESSAGE: &str = "No donations to show.";

const HEADERS: [&str; 5] = ["Donor", "Type", "Qty/Amount", "Date", "Id"];

fn row(record: &DonationRecord) -> [String; 5] {
    [
        record.donor.clone(),
        record.donation_type.label().to_string(),
        record.display_value(),
        record.date.clone(),
        record.id.clone(),
    ]
}

/// Render donations as an aligned table.
#[must_use]
pub fn render_table(records: &[&DonationRecord]) -> String {
    if records.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }

    let rows: Vec<[String; 5]> = records.iter().map(|r| row(r)).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS.iter().map(ToString::to_string).collect();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out.truncate(out.trim_end().len());
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Render donations one per line.
#[must_use]
pub fn render_plain(records: &[&DonationRecord]) -> String {
    if records.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }

    records
        .iter()
        .map(|r| {
            format!(
                "{}  {}  {}  {}  {}",
                r.date,
                r.donor,
                r.donation_type.label(),
                r.display_value(),
                r.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the summary of one donation type.
#[must_use]
pub fn render_summary(summary: &Summary) -> String {
    let t: DonationType = summary.donation_type;
    format!(
        "Summary for \"{}\"\nCount: {} - Total {}: {}",
        t.label(),
        summary.count,
        t.value_label(),
        summary.total
    )
}

/// Render whole-list statistics.
#[must_use]
pub fn render_statistics(stats: &Statistics) -> String {
    format!(
        "Total number of donations: {}\nTotal amount donated (money): ${}",
        stats.total_count, stats.total_money
    )
}
