//! Filter/search engine.
//!
//! A record passes when it satisfies every predicate: the free-text search
//! and one exact-match constraint per [`Dimension`]. All comparisons are
//! case-insensitive. Results keep input order.

use serde::Serialize;
use std::fmt;

use crate::record::{Dimension, FeedbackRecord};

/// Literal that means "no constraint" on a dimension.
pub const ALL: &str = "all";

/// Constraint on one dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DimensionFilter {
    #[default]
    All,
    Only(String),
}

impl DimensionFilter {
    /// `"all"` (any casing) or an empty string means no constraint.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            DimensionFilter::All
        } else {
            DimensionFilter::Only(trimmed.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DimensionFilter::Only(_))
    }

    /// An absent field never satisfies an active constraint.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            DimensionFilter::All => true,
            DimensionFilter::Only(wanted) => {
                value.is_some_and(|v| v.to_lowercase() == wanted.to_lowercase())
            }
        }
    }
}

impl From<Option<String>> for DimensionFilter {
    fn from(value: Option<String>) -> Self {
        value.map(|v| Self::parse(&v)).unwrap_or_default()
    }
}

impl fmt::Display for DimensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionFilter::All => write!(f, "{}", ALL),
            DimensionFilter::Only(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for DimensionFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The active query of an explorer view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterState {
    pub search_term: String,
    pub sentiment: DimensionFilter,
    pub urgency: DimensionFilter,
    pub platform: DimensionFilter,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sentiment(mut self, value: &str) -> Self {
        self.sentiment = DimensionFilter::parse(value);
        self
    }

    pub fn with_urgency(mut self, value: &str) -> Self {
        self.urgency = DimensionFilter::parse(value);
        self
    }

    pub fn with_platform(mut self, value: &str) -> Self {
        self.platform = DimensionFilter::parse(value);
        self
    }

    pub fn dimension(&self, dimension: Dimension) -> &DimensionFilter {
        match dimension {
            Dimension::Sentiment => &self.sentiment,
            Dimension::Urgency => &self.urgency,
            Dimension::Platform => &self.platform,
        }
    }

    pub fn set_dimension(&mut self, dimension: Dimension, filter: DimensionFilter) {
        match dimension {
            Dimension::Sentiment => self.sentiment = filter,
            Dimension::Urgency => self.urgency = filter,
            Dimension::Platform => self.platform = filter,
        }
    }

    /// Number of dimensions with a constraint (the search term is not counted).
    pub fn active_filter_count(&self) -> usize {
        Dimension::ALL
            .iter()
            .filter(|d| self.dimension(**d).is_active())
            .count()
    }

    /// True when the state admits every record.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.active_filter_count() == 0
    }

    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        let needle = self.search_term.to_lowercase();
        self.matches_prepared(record, &needle)
    }

    fn matches_prepared(&self, record: &FeedbackRecord, needle: &str) -> bool {
        matches_search(record, needle)
            && Dimension::ALL
                .iter()
                .all(|d| self.dimension(*d).matches(record.dimension(*d)))
    }
}

/// `needle` must already be lower-cased. Searches the raw message, the
/// alternate body and the derived identity.
fn matches_search(record: &FeedbackRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains =
        |haystack: Option<&str>| haystack.is_some_and(|h| h.to_lowercase().contains(needle));
    contains(record.raw_message()) || contains(record.body()) || contains(Some(record.identity()))
}

/// Records passing `filters`, in input order.
pub fn apply<'a>(records: &'a [FeedbackRecord], filters: &FilterState) -> Vec<&'a FeedbackRecord> {
    let needle = filters.search_term.to_lowercase();
    records
        .iter()
        .filter(|r| filters.matches_prepared(r, &needle))
        .collect()
}

/// Positions of the records passing `filters`, ascending.
pub fn apply_indices(records: &[FeedbackRecord], filters: &FilterState) -> Vec<usize> {
    let needle = filters.search_term.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.matches_prepared(r, &needle))
        .map(|(idx, _)| idx)
        .collect()
}
