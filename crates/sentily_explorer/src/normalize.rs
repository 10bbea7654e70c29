//! Raw feedback object -> [`FeedbackRecord`].
//!
//! Backends disagree on field names (the sender may arrive as `username`,
//! `sender`, `author`, ...). Each canonical field is resolved by probing a
//! fixed, ordered candidate list and taking the first usable value. The
//! order is part of the contract.
//!
//! Normalization never fails: anything absent or malformed falls back.

use serde_json::Value;
use sentily_protocol::FetchError;

use crate::record::{FeedbackRecord, ANONYMOUS};

/// Identity candidates, highest precedence first.
pub const IDENTITY_FIELDS: [&str; 7] = [
    "username",
    "sender",
    "author",
    "user",
    "name",
    "user_name",
    "sender_name",
];

pub const MESSAGE_FIELD: &str = "message";

/// Alternate body of a `/feedback` record.
pub const BODY_FIELDS: [&str; 1] = ["cleaned_body"];

/// `/alerts` renames `cleaned_body` to `details`; both are accepted there.
pub const ALERT_BODY_FIELDS: [&str; 2] = ["details", "cleaned_body"];

pub const RECOMMENDED_ACTION_FIELDS: [&str; 2] = ["action_recommended", "action"];

/// Derive the canonical record. The raw object is cloned, never modified.
pub fn normalize(raw: &Value) -> FeedbackRecord {
    normalize_with_body(raw, &BODY_FIELDS)
}

/// [`normalize`] for an `/alerts` item.
pub fn normalize_alert(raw: &Value) -> FeedbackRecord {
    normalize_with_body(raw, &ALERT_BODY_FIELDS)
}

fn normalize_with_body(raw: &Value, body_fields: &[&str]) -> FeedbackRecord {
    FeedbackRecord {
        identity: first_text(raw, &IDENTITY_FIELDS).unwrap_or_else(|| ANONYMOUS.to_string()),
        message: text_field(raw, MESSAGE_FIELD),
        body: first_text(raw, body_fields),
        sentiment: text_field(raw, "sentiment"),
        urgency: text_field(raw, "urgency"),
        platform: text_field(raw, "platform"),
        date: text_field(raw, "date"),
        feedback_type: text_field(raw, "feedback_type"),
        recommended_action: first_text(raw, &RECOMMENDED_ACTION_FIELDS),
        raw: raw.clone(),
    }
}

/// Normalize a list payload. The body must be a JSON array; anything else is
/// a shape error rather than an empty list.
pub fn records_from_json(body: &Value) -> Result<Vec<FeedbackRecord>, FetchError> {
    let records = list_items(body)?.iter().map(normalize).collect::<Vec<_>>();
    let anonymous = records.iter().filter(|r| r.identity() == ANONYMOUS).count();
    tracing::debug!(
        records = records.len(),
        anonymous,
        "normalized feedback payload"
    );
    Ok(records)
}

/// [`records_from_json`] for the `/alerts` payload.
pub fn alerts_from_json(body: &Value) -> Result<Vec<FeedbackRecord>, FetchError> {
    let records = list_items(body)?.iter().map(normalize_alert).collect::<Vec<_>>();
    tracing::debug!(alerts = records.len(), "normalized alerts payload");
    Ok(records)
}

fn list_items(body: &Value) -> Result<&Vec<Value>, FetchError> {
    body.as_array().ok_or_else(|| {
        FetchError::parse(format!(
            "expected a JSON array of records, got {}",
            json_kind(body)
        ))
    })
}

/// First candidate field holding usable text.
pub fn first_text(raw: &Value, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|key| text_field(raw, key))
}

/// Text value of one field. Strings must be non-empty; numbers are rendered;
/// null, booleans, arrays and objects count as absent.
pub fn text_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
