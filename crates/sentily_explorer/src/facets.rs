//! Distinct values per filterable dimension, used to populate filter choices.
//!
//! Values are deduplicated by their lower-cased form; the first spelling
//! seen is the one kept. Order follows first occurrence.

use serde::Serialize;
use std::collections::HashSet;

use crate::record::{Dimension, FeedbackRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetSet {
    pub sentiments: Vec<String>,
    pub urgencies: Vec<String>,
    pub platforms: Vec<String>,
}

impl FacetSet {
    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Sentiment => &self.sentiments,
            Dimension::Urgency => &self.urgencies,
            Dimension::Platform => &self.platforms,
        }
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        let key = value.to_lowercase();
        self.values(dimension).iter().any(|v| v.to_lowercase() == key)
    }
}

#[derive(Default)]
struct FacetCollector {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl FacetCollector {
    fn offer(&mut self, value: Option<&str>) {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return;
        };
        if self.seen.insert(value.to_lowercase()) {
            self.values.push(value.to_string());
        }
    }
}

/// Facets over the full record collection (not a filtered subset).
pub fn extract_facets(records: &[FeedbackRecord]) -> FacetSet {
    let mut sentiments = FacetCollector::default();
    let mut urgencies = FacetCollector::default();
    let mut platforms = FacetCollector::default();

    for record in records {
        sentiments.offer(record.sentiment());
        urgencies.offer(record.urgency());
        platforms.offer(record.platform());
    }

    FacetSet {
        sentiments: sentiments.values,
        urgencies: urgencies.values,
        platforms: platforms.values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    #[test]
    fn test_case_insensitive_dedup_keeps_first_spelling() {
        let records: Vec<FeedbackRecord> = ["Positive", "positive", "NEGATIVE"]
            .iter()
            .map(|s| normalize(&json!({ "sentiment": s })))
            .collect();
        let facets = extract_facets(&records);
        assert_eq!(facets.sentiments, vec!["Positive".to_string(), "NEGATIVE".to_string()]);
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let records = vec![
            normalize(&json!({"platform": "Email"})),
            normalize(&json!({"platform": ""})),
            normalize(&json!({})),
            normalize(&json!({"platform": "Reddit", "urgency": "high"})),
        ];
        let facets = extract_facets(&records);
        assert_eq!(facets.platforms, vec!["Email", "Reddit"]);
        assert_eq!(facets.urgencies, vec!["high"]);
        assert!(facets.sentiments.is_empty());
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let records = vec![normalize(&json!({"urgency": "High"}))];
        let facets = extract_facets(&records);
        assert!(facets.contains(Dimension::Urgency, "HIGH"));
        assert!(!facets.contains(Dimension::Urgency, "low"));
    }
}
