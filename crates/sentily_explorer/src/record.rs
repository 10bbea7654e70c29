//! Canonical feedback record.
//!
//! A [`FeedbackRecord`] is a derived, read-only view over one raw feedback
//! object. Records are only produced by [`crate::normalize`]; nothing
//! downstream can change them.

use serde::Serialize;
use serde_json::Value;

/// Fallback identity when no name field is present.
pub const ANONYMOUS: &str = "Anonymous";
/// Fallback display message when neither message field is present.
pub const NO_MESSAGE: &str = "No message available";
/// Display label for an absent sentiment/urgency/platform/date.
pub const UNKNOWN: &str = "Unknown";

/// A filterable dimension of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Sentiment,
    Urgency,
    Platform,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Sentiment, Dimension::Urgency, Dimension::Platform];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Sentiment => "sentiment",
            Dimension::Urgency => "urgency",
            Dimension::Platform => "platform",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRecord {
    pub(crate) identity: String,
    pub(crate) message: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) sentiment: Option<String>,
    pub(crate) urgency: Option<String>,
    pub(crate) platform: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) feedback_type: Option<String>,
    pub(crate) recommended_action: Option<String>,
    #[serde(skip)]
    pub(crate) raw: Value,
}

impl FeedbackRecord {
    /// Submitter display name; never empty.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Primary message field as sent by the backend.
    pub fn raw_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Alternate body field (`cleaned_body`; alerts also accept `details`).
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Message for display: primary field, then alternate body, then fallback.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.body.as_deref())
            .unwrap_or(NO_MESSAGE)
    }

    pub fn sentiment(&self) -> Option<&str> {
        self.sentiment.as_deref()
    }

    pub fn urgency(&self) -> Option<&str> {
        self.urgency.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn feedback_type(&self) -> Option<&str> {
        self.feedback_type.as_deref()
    }

    pub fn recommended_action(&self) -> Option<&str> {
        self.recommended_action.as_deref()
    }

    /// The untouched source object.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Sentiment => self.sentiment(),
            Dimension::Urgency => self.urgency(),
            Dimension::Platform => self.platform(),
        }
    }

    pub fn sentiment_tone(&self) -> Tone {
        Tone::of_sentiment(self.sentiment())
    }

    pub fn urgency_level(&self) -> UrgencyLevel {
        UrgencyLevel::of(self.urgency())
    }
}

/// Display classification of a sentiment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Other,
}

impl Tone {
    pub fn of_sentiment(sentiment: Option<&str>) -> Self {
        match sentiment.map(str::to_lowercase).as_deref() {
            Some("positive") => Tone::Positive,
            Some("negative") => Tone::Negative,
            Some("neutral") => Tone::Neutral,
            _ => Tone::Other,
        }
    }
}

/// Display classification of an urgency value. Matching is by substring so
/// that labels like "high priority" still classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl UrgencyLevel {
    pub fn of(urgency: Option<&str>) -> Self {
        let Some(value) = urgency.map(str::to_lowercase) else {
            return UrgencyLevel::Unknown;
        };
        if value.contains("high") {
            UrgencyLevel::High
        } else if value.contains("medium") {
            UrgencyLevel::Medium
        } else if value.contains("low") {
            UrgencyLevel::Low
        } else {
            UrgencyLevel::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    #[test]
    fn test_message_prefers_primary_then_body() {
        let both = normalize(&json!({"message": "primary", "cleaned_body": "alt"}));
        assert_eq!(both.message(), "primary");

        let body_only = normalize(&json!({"cleaned_body": "alt"}));
        assert_eq!(body_only.message(), "alt");
        assert_eq!(body_only.raw_message(), None);

        let neither = normalize(&json!({}));
        assert_eq!(neither.message(), NO_MESSAGE);
    }

    #[test]
    fn test_tone_is_case_insensitive() {
        assert_eq!(Tone::of_sentiment(Some("POSITIVE")), Tone::Positive);
        assert_eq!(Tone::of_sentiment(Some("Neutral")), Tone::Neutral);
        assert_eq!(Tone::of_sentiment(Some("mixed")), Tone::Other);
        assert_eq!(Tone::of_sentiment(None), Tone::Other);
    }

    #[test]
    fn test_urgency_level_substring() {
        assert_eq!(UrgencyLevel::of(Some("High")), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::of(Some("very high priority")), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::of(Some("medium")), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::of(Some("LOW")), UrgencyLevel::Low);
        assert_eq!(UrgencyLevel::of(Some("urgent")), UrgencyLevel::Unknown);
        assert_eq!(UrgencyLevel::of(None), UrgencyLevel::Unknown);
    }

    #[test]
    fn test_dimension_accessor() {
        let record = normalize(&json!({"sentiment": "Positive", "platform": "Reddit"}));
        assert_eq!(record.dimension(Dimension::Sentiment), Some("Positive"));
        assert_eq!(record.dimension(Dimension::Urgency), None);
        assert_eq!(record.dimension(Dimension::Platform), Some("Reddit"));
    }
}
