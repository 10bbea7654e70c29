//! Typed view over the `/summary` aggregate payload.
//!
//! The payload is treated leniently: missing or mistyped keys degrade to
//! zero/empty. Older backends send `*_distribution` instead of `*_counts`.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::normalize::text_field;

/// One bucket of a per-sentiment breakdown (a platform, or a day).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentPoint {
    pub name: String,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentPoint {
    pub fn total(&self) -> u64 {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.neutral)
    }

    fn from_json(value: &Value) -> Option<Self> {
        let name = text_field(value, "name")
            .or_else(|| text_field(value, "date"))
            .or_else(|| text_field(value, "platform"))?;
        Some(Self {
            name,
            positive: count(value.get("positive")),
            negative: count(value.get("negative")),
            neutral: count(value.get("neutral")),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_feedback: u64,
    pub sentiment_counts: BTreeMap<String, u64>,
    pub urgency_counts: BTreeMap<String, u64>,
    pub feedback_type_counts: BTreeMap<String, u64>,
    pub platform_comparison: Vec<SentimentPoint>,
    pub trends: Vec<SentimentPoint>,
}

impl DashboardSummary {
    pub fn from_json(body: &Value) -> Self {
        let summary = Self {
            total_feedback: count(body.get("total_feedback")),
            sentiment_counts: counts(body, &["sentiment_counts", "sentiment_distribution"]),
            urgency_counts: counts(body, &["urgency_counts", "urgency_distribution"]),
            feedback_type_counts: counts(
                body,
                &["feedback_type_counts", "feedback_type_distribution"],
            ),
            platform_comparison: points(body.get("platform_comparison")),
            trends: points(body.get("trends")),
        };
        tracing::debug!(
            total = summary.total_feedback,
            platforms = summary.platform_comparison.len(),
            trend_points = summary.trends.len(),
            "parsed dashboard summary"
        );
        summary
    }

    /// Count for `sentiment`, case-insensitive; zero when absent.
    pub fn sentiment(&self, sentiment: &str) -> u64 {
        lookup(&self.sentiment_counts, sentiment)
    }

    pub fn urgency(&self, urgency: &str) -> u64 {
        lookup(&self.urgency_counts, urgency)
    }

    /// Share of `part` in `total_feedback`, as a whole percentage.
    ///
    /// Counts come off the wire unchecked, so the arithmetic is widened to
    /// `u128` and the result saturates.
    pub fn percent(&self, part: u64) -> u64 {
        if self.total_feedback == 0 {
            return 0;
        }
        let total = u128::from(self.total_feedback);
        let rounded = (u128::from(part) * 100 + total / 2) / total;
        u64::try_from(rounded).unwrap_or(u64::MAX)
    }
}

fn lookup(map: &BTreeMap<String, u64>, key: &str) -> u64 {
    map.iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case(key))
        .fold(0u64, |acc, (_, v)| acc.saturating_add(*v))
}

/// Non-negative integer count; floats are truncated, anything else is 0.
fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn counts(body: &Value, keys: &[&str]) -> BTreeMap<String, u64> {
    keys.iter()
        .find_map(|key| body.get(*key).and_then(Value::as_object))
        .map(|object| {
            object
                .iter()
                .map(|(k, v)| (k.clone(), count(Some(v))))
                .collect()
        })
        .unwrap_or_default()
}

fn points(value: Option<&Value>) -> Vec<SentimentPoint> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(SentimentPoint::from_json).collect())
        .unwrap_or_default()
}
