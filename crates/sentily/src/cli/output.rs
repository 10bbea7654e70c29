//! Output formatting utilities for CLI commands
//!
//! Provides consistent formatting for:
//! - Tables with column alignment
//! - Sentiment and urgency colors
//! - Truncated message previews

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use sentily_explorer::{Tone, UrgencyLevel};

/// Placeholder for absent values in tables
pub const EMPTY_CELL: &str = "-";

/// Build a table with the standard preset and a cyan header row
fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);
    table
}

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut table = new_table(headers);
    for row in rows {
        table.add_row(row);
    }
    println!("{}", table);
}

/// Print a table with custom column colors
pub fn print_table_colored(headers: &[&str], rows: Vec<Vec<(String, Option<Color>)>>) {
    let mut table = new_table(headers);
    for row in rows {
        let cells: Vec<Cell> = row
            .into_iter()
            .map(|(text, color)| {
                let cell = Cell::new(text);
                if let Some(c) = color {
                    cell.fg(c)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

/// Color for a sentiment badge
pub fn color_for_tone(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Positive => Some(Color::Green),
        Tone::Negative => Some(Color::Red),
        Tone::Neutral => Some(Color::Yellow),
        Tone::Other => None,
    }
}

/// Color for an urgency badge
pub fn color_for_urgency(level: UrgencyLevel) -> Option<Color> {
    match level {
        UrgencyLevel::High => Some(Color::Red),
        UrgencyLevel::Medium => Some(Color::Yellow),
        UrgencyLevel::Low => Some(Color::Green),
        UrgencyLevel::Unknown => None,
    }
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with "..."
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Value or the table placeholder
pub fn or_empty(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

/// Page navigation line, e.g. "Page 2 of 7  < 1 [2] 3 4 5 >"
pub fn page_bar(current: usize, total: usize, numbers: impl Iterator<Item = usize>) -> String {
    let mut bar = format!("Page {} of {} ", current, total.max(1));
    bar.push_str(if current > 1 { " <" } else { "  " });
    for n in numbers {
        if n == current {
            bar.push_str(&format!(" [{}]", n));
        } else {
            bar.push_str(&format!(" {}", n));
        }
    }
    if current < total {
        bar.push_str(" >");
    }
    bar
}
