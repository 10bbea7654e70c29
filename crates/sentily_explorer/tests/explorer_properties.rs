//! Explorer Pipeline Tests
//!
//! End-to-end checks of normalize -> filter -> paginate -> facets over
//! payloads shaped like real `/feedback` responses.

use serde_json::{json, Value};
use sentily_explorer::*;

fn payload() -> Value {
    json!([
        {"username": "ana", "message": "great app", "sentiment": "Positive", "urgency": "Low", "platform": "Reddit"},
        {"sender": "bo", "message": "terrible bug", "sentiment": "Negative", "urgency": "High", "platform": "Email"},
        {"author": "cy", "cleaned_body": "Bug in checkout flow", "sentiment": "negative", "urgency": "medium", "platform": "email"},
        {"message": "meh", "sentiment": "Neutral", "platform": "App Store"},
        {"name": "dee", "sentiment": "POSITIVE", "urgency": "low"},
    ])
}

fn records() -> Vec<FeedbackRecord> {
    records_from_json(&payload()).unwrap()
}

#[test]
fn test_identity_filter_is_noop() {
    let records = records();
    let result = apply(&records, &FilterState::default());
    assert_eq!(result.len(), records.len());
    for (a, b) in result.iter().zip(records.iter()) {
        assert_eq!(*a, b);
    }
}

#[test]
fn test_absent_term_yields_empty_result() {
    let records = records();
    let result = apply(&records, &FilterState::new().with_search("zzz-not-present"));
    assert!(result.is_empty());
}

#[test]
fn test_bug_search_matches_message_and_body() {
    let records = records();
    let result = apply(&records, &FilterState::new().with_search("BUG"));
    let names: Vec<&str> = result.iter().map(|r| r.identity()).collect();
    assert_eq!(names, vec!["bo", "cy"]);
}

#[test]
fn test_filter_result_is_subsequence() {
    let records = records();
    let filters = FilterState::new().with_platform("EMAIL");
    let result = apply(&records, &filters);
    assert_eq!(result.len(), 2);
    let mut cursor = records.iter();
    for item in &result {
        assert!(cursor.any(|r| r == *item), "order must be preserved");
    }
    for item in &result {
        assert!(filters.matches(item));
    }
}

#[test]
fn test_pages_concatenate_to_filtered_list() {
    let mut raw = Vec::new();
    for i in 0..37 {
        raw.push(json!({"message": format!("m{}", i), "sentiment": if i % 3 == 0 { "Positive" } else { "Negative" }}));
    }
    let records = records_from_json(&Value::Array(raw)).unwrap();
    let filtered = apply(&records, &FilterState::new().with_sentiment("negative"));
    let pages = total_pages(filtered.len(), 10);
    assert_eq!(pages, 3);

    let mut rebuilt = Vec::new();
    for p in 1..=pages {
        let page = paginate(&filtered, p, 10);
        assert!(page.items.len() <= 10);
        rebuilt.extend_from_slice(page.items);
    }
    assert_eq!(rebuilt, filtered);
}

#[test]
fn test_twenty_five_record_scenario() {
    let raw: Vec<Value> = (0..25).map(|i| json!({"message": format!("r{}", i)})).collect();
    let mut view = ExplorerView::with_records(records_from_json(&Value::Array(raw)).unwrap(), 10);
    assert_eq!(view.total_pages(), 3);

    view.go_to_page(3);
    assert_eq!(view.current_page().records.len(), 5);

    view.go_to_page(4);
    assert_eq!(view.page_state().current(), 3);
}

#[test]
fn test_total_pages_boundaries() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(1, 10), 1);
}

#[test]
fn test_facets_from_full_collection() {
    let mut view = ExplorerView::with_records(records(), 10);
    view.set_filters(FilterState::new().with_platform("reddit"));
    let facets = view.facets().clone();
    assert_eq!(facets.sentiments, vec!["Positive", "Negative", "Neutral"]);
    assert_eq!(facets.platforms, vec!["Reddit", "Email", "App Store"]);
    assert_eq!(facets.urgencies, vec!["Low", "High", "medium"]);
}

#[test]
fn test_facet_dedup_scenario() {
    let raw = json!([{"sentiment": "Positive"}, {"sentiment": "positive"}, {"sentiment": "NEGATIVE"}]);
    let facets = extract_facets(&records_from_json(&raw).unwrap());
    assert_eq!(facets.sentiments.len(), 2);
}

#[test]
fn test_every_record_has_identity_and_message() {
    for record in records() {
        assert!(!record.identity().is_empty());
        assert!(!record.message().is_empty());
    }
    let last = &records()[4];
    assert_eq!(last.identity(), "dee");
    assert_eq!(last.message(), "No message available");
    assert_eq!(records()[3].identity(), "Anonymous");
}
