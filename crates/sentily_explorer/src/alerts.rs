//! Alerts view model.
//!
//! Alerts are ordinary feedback records (normalized the same way) with a
//! looser urgency filter: the selected level matches any urgency label that
//! contains it, so "high" also selects "very high".

use serde::Serialize;
use std::collections::HashSet;

use crate::filter::DimensionFilter;
use crate::record::{FeedbackRecord, UrgencyLevel};

/// Alerts shown in the table; the stats still cover every alert.
pub const ALERT_DISPLAY_LIMIT: usize = 20;
/// Details are cut to this many characters in the table.
pub const DETAILS_PREVIEW_CHARS: usize = 100;

pub const NO_PLATFORM: &str = "N/A";
pub const DEFAULT_URGENCY: &str = "Low";
pub const NO_DETAILS: &str = "No details";
pub const NO_DATE: &str = "Recent";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    pub total: usize,
    /// Alerts whose urgency label contains "high"
    pub high_urgency: usize,
    /// Distinct non-empty feedback types, case-insensitive
    pub feedback_types: usize,
}

impl AlertStats {
    pub fn compute(alerts: &[FeedbackRecord]) -> Self {
        let high_urgency = alerts
            .iter()
            .filter(|a| a.urgency_level() == UrgencyLevel::High)
            .count();
        let feedback_types: HashSet<String> = alerts
            .iter()
            .filter_map(|a| a.feedback_type())
            .map(str::to_lowercase)
            .collect();
        Self {
            total: alerts.len(),
            high_urgency,
            feedback_types: feedback_types.len(),
        }
    }
}

/// Client-side urgency filter over fetched alerts, in input order.
pub fn filter_by_urgency<'a>(
    alerts: &'a [FeedbackRecord],
    urgency: &DimensionFilter,
) -> Vec<&'a FeedbackRecord> {
    match urgency {
        DimensionFilter::All => alerts.iter().collect(),
        DimensionFilter::Only(wanted) => {
            let wanted = wanted.to_lowercase();
            alerts
                .iter()
                .filter(|a| a.urgency().is_some_and(|u| u.to_lowercase().contains(&wanted)))
                .collect()
        }
    }
}

/// One alert table row with display fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
    pub platform: String,
    pub urgency: String,
    pub details: String,
    pub date: String,
    pub feedback_type: Option<String>,
    pub action: Option<String>,
}

impl AlertRow {
    pub fn from_record(record: &FeedbackRecord) -> Self {
        Self {
            platform: record.platform().unwrap_or(NO_PLATFORM).to_string(),
            urgency: record.urgency().unwrap_or(DEFAULT_URGENCY).to_string(),
            details: record
                .body()
                .or(record.raw_message())
                .map(|d| preview(d, DETAILS_PREVIEW_CHARS))
                .unwrap_or_else(|| NO_DETAILS.to_string()),
            date: record.date().unwrap_or(NO_DATE).to_string(),
            feedback_type: record.feedback_type().map(str::to_string),
            action: record.recommended_action().map(str::to_string),
        }
    }
}

/// First `max_chars` characters (not bytes).
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Table rows for the first [`ALERT_DISPLAY_LIMIT`] alerts.
pub fn display_rows(alerts: &[&FeedbackRecord]) -> Vec<AlertRow> {
    alerts
        .iter()
        .take(ALERT_DISPLAY_LIMIT)
        .map(|a| AlertRow::from_record(a))
        .collect()
}
