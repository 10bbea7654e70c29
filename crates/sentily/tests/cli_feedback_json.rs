mod cli_support;

use cli_support::{args, assert_cli_success, run_cli, run_cli_json, run_cli_json_error};
use sentily_test_utils::{unreachable_api_base, FakeBackend};
use serde::Deserialize;
use serde_json::{json, Value};
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
struct FeedbackOutput {
    page: usize,
    page_size: usize,
    total_pages: usize,
    page_numbers: Vec<usize>,
    total_matches: usize,
    total_records: usize,
    showing: Option<Showing>,
    items: Vec<FeedbackItem>,
    facets: Facets,
    active_filters: usize,
}

#[derive(Debug, Deserialize)]
struct Showing {
    from: usize,
    to: usize,
}

#[derive(Debug, Deserialize)]
struct FeedbackItem {
    position: usize,
    user: String,
    message: String,
    sentiment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Facets {
    sentiments: Vec<String>,
    platforms: Vec<String>,
}

fn feedback_payload(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "username": format!("user{}", i),
                "message": format!("feedback number {}", i),
                "sentiment": if i % 2 == 0 { "Positive" } else { "negative" },
                "platform": if i % 3 == 0 { "Reddit" } else { "Email" },
            })
        })
        .collect();
    Value::Array(items)
}

fn backend_with_feedback(payload: Value) -> FakeBackend {
    FakeBackend::builder()
        .json("/api/feedback", payload)
        .start()
        .expect("start fake backend")
}

#[test]
fn test_feedback_pages_and_clamps() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_string_lossy().to_string();
    let backend = backend_with_feedback(feedback_payload(25));
    let base = backend.api_base();
    let envs = [("SENTILY_HOME", home_str.as_str()), ("RUST_LOG", "error")];

    let out: FeedbackOutput = run_cli_json(
        &args(&["--api-base", &base, "feedback", "--page", "3", "--json"]),
        &envs,
    );
    assert_eq!(out.total_pages, 3);
    assert_eq!(out.page, 3);
    assert_eq!(out.items.len(), 5);
    assert_eq!(out.items[0].position, 21);
    assert_eq!(out.items[0].user, "user20");
    let showing = out.showing.unwrap();
    assert_eq!((showing.from, showing.to), (21, 25));
    assert_eq!(out.page_numbers, vec![1, 2, 3]);

    let clamped: FeedbackOutput = run_cli_json(
        &args(&["--api-base", &base, "feedback", "--page", "4", "--json"]),
        &envs,
    );
    assert_eq!(clamped.page, 3);

    let requests = backend.requests();
    assert_eq!(requests[0].query.as_deref(), Some("limit=200"));
}

#[test]
fn test_feedback_search_and_filters() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_string_lossy().to_string();
    let backend = backend_with_feedback(json!([
        {"username": "ana", "message": "great app", "sentiment": "Positive", "platform": "Reddit"},
        {"sender": "bo", "message": "terrible bug", "sentiment": "Negative", "platform": "Email"},
        {"cleaned_body": "another BUG report", "sentiment": "negative", "platform": "email"},
    ]));
    let base = backend.api_base();
    let envs = [("SENTILY_HOME", home_str.as_str()), ("RUST_LOG", "error")];

    let out: FeedbackOutput = run_cli_json(
        &args(&["--api-base", &base, "feedback", "--search", "bug", "--json"]),
        &envs,
    );
    assert_eq!(out.total_matches, 2);
    assert_eq!(out.total_records, 3);
    assert_eq!(out.items[0].user, "bo");
    assert_eq!(out.items[1].user, "Anonymous");
    assert_eq!(out.items[1].message, "another BUG report");
    assert_eq!(out.active_filters, 0);

    let out: FeedbackOutput = run_cli_json(
        &args(&[
            "--api-base",
            &base,
            "feedback",
            "--sentiment",
            "NEGATIVE",
            "--platform",
            "EMAIL",
            "--json",
        ]),
        &envs,
    );
    assert_eq!(out.total_matches, 2);
    assert_eq!(out.active_filters, 2);
    assert!(out
        .items
        .iter()
        .all(|i| i.sentiment.as_deref().map(str::to_lowercase) == Some("negative".to_string())));

    // Facets come from the full set, regardless of filters.
    assert_eq!(out.facets.sentiments, vec!["Positive", "Negative"]);
    assert_eq!(out.facets.platforms, vec!["Reddit", "Email"]);

    let none: FeedbackOutput = run_cli_json(
        &args(&["--api-base", &base, "feedback", "--search", "nothing-like-this", "--json"]),
        &envs,
    );
    assert_eq!(none.total_matches, 0);
    assert_eq!(none.total_pages, 0);
    assert!(none.items.is_empty());
    assert!(none.showing.is_none());
}

#[test]
fn test_feedback_page_size_from_config_file() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_string_lossy().to_string();
    let backend = backend_with_feedback(feedback_payload(12));
    std::fs::write(
        home.path().join("config.toml"),
        format!(
            "[api]\nbase_url = \"{}\"\nfeedback_limit = 50\npage_size = 5\n",
            backend.api_base()
        ),
    )
    .unwrap();
    let envs = [("SENTILY_HOME", home_str.as_str()), ("RUST_LOG", "error")];

    let out: FeedbackOutput = run_cli_json(&args(&["feedback", "--json"]), &envs);
    assert_eq!(out.page_size, 5);
    assert_eq!(out.total_pages, 3);
    assert_eq!(backend.requests()[0].query.as_deref(), Some("limit=50"));
}

#[test]
fn test_feedback_server_error_is_error_not_empty() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_string_lossy().to_string();
    let backend = FakeBackend::builder()
        .status("/api/feedback", 500, r#"{"detail":"boom"}"#)
        .start()
        .unwrap();
    let base = backend.api_base();
    let envs = [("SENTILY_HOME", home_str.as_str()), ("RUST_LOG", "error")];

    let err = run_cli_json_error(&args(&["--api-base", &base, "feedback", "--json"]), &envs);
    let message = err["error"]["message"].as_str().unwrap();
    assert!(message.contains("HTTP error! status: 500"), "{}", message);
    assert!(err.get("items").is_none());

    let output = run_cli(&args(&["--api-base", &base, "feedback"]), &envs);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("TRY:"));
}

#[test]
fn test_feedback_unreachable_backend() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_string_lossy().to_string();
    let base = unreachable_api_base().unwrap();
    let envs = [("SENTILY_HOME", home_str.as_str()), ("RUST_LOG", "error")];

    let err = run_cli_json_error(&args(&["--api-base", &base, "feedback", "--json"]), &envs);
    assert!(err["error"]["message"]
        .as_str()
        .unwrap()
        .contains("backend unreachable"));
    let suggestions = err["error"]["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
}

#[test]
fn test_feedback_show_detail_includes_raw() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_string_lossy().to_string();
    let backend = backend_with_feedback(json!([
        {"username": "ana", "message": "great", "sentiment": "Positive", "extra_field": 7},
        {"author": "cy", "message": "slow checkout", "sentiment": "Negative", "action_recommended": "escalate"},
    ]));
    let base = backend.api_base();
    let envs = [("SENTILY_HOME", home_str.as_str()), ("RUST_LOG", "error")];

    let detail: Value = run_cli_json(
        &args(&[
            "--api-base",
            &base,
            "feedback",
            "--sentiment",
            "negative",
            "--show",
            "1",
            "--json",
        ]),
        &envs,
    );
    assert_eq!(detail["record"]["user"], "cy");
    assert_eq!(detail["recommended_action"], "escalate");
    assert_eq!(detail["raw"]["author"], "cy");

    let err = run_cli_json_error(
        &args(&["--api-base", &base, "feedback", "--show", "9", "--json"]),
        &envs,
    );
    assert!(err["error"]["message"]
        .as_str()
        .unwrap()
        .contains("position 9"));
}

#[test]
fn test_feedback_table_output() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_string_lossy().to_string();
    let backend = backend_with_feedback(feedback_payload(3));
    let base = backend.api_base();
    let envs = [("SENTILY_HOME", home_str.as_str()), ("RUST_LOG", "error")];

    let cmd = args(&["--api-base", &base, "feedback"]);
    let output = run_cli(&cmd, &envs);
    assert_cli_success(&output, &cmd);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("user0"));
    assert!(stdout.contains("Showing 1 to 3 of 3 results"));

    let empty = backend_with_feedback(json!([]));
    let empty_base = empty.api_base();
    let cmd = args(&["--api-base", &empty_base, "feedback"]);
    let output = run_cli(&cmd, &envs);
    assert_cli_success(&output, &cmd);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No feedback available."));
}
