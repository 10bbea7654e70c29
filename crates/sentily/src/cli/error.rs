//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use serde::Serialize;
use std::fmt;
use std::path::Path;

use sentily_protocol::{ConfigError, FetchError};

/// An error with helpful context and suggestions
#[derive(Debug, Serialize)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(
        mut self,
        suggestions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// A request to the backend failed
    pub fn fetch_failed(what: &str, url: &str, err: &FetchError) -> Self {
        match err {
            FetchError::Transport(_) => {
                Self::new(format!("Could not load {}: backend unreachable", what))
                    .with_context(format!("GET {} failed: {}", url, err))
                    .with_suggestions([
                        "TRY: Ensure the backend is reachable and running".to_string(),
                        "TRY: Check the configured API base URL: sentily config".to_string(),
                        "TRY: Point at another backend: sentily --api-base http://HOST:PORT/api <command>"
                            .to_string(),
                    ])
            }
            FetchError::RequestFailed { status } => {
                Self::new(format!("Could not load {}: {}", what, err))
                    .with_context(format!("GET {} returned status {}", url, status))
                    .with_suggestions([
                        "TRY: Check the backend logs for the failing request".to_string(),
                        "TRY: Verify the backend is healthy: sentily health".to_string(),
                        "TRY: Run the command again to refetch".to_string(),
                    ])
            }
            FetchError::Parse(_) => {
                Self::new(format!("Could not load {}: unexpected response", what))
                    .with_context(format!("GET {}: {}", url, err))
                    .with_suggestions([
                        "TRY: Confirm the API base URL points at the feedback API (usually ends in /api)"
                            .to_string(),
                        "TRY: Inspect the raw response: curl -s URL".to_string(),
                    ])
            }
        }
    }

    /// Configuration could not be loaded or is invalid
    pub fn invalid_config(err: &ConfigError, path: &Path) -> Self {
        Self::new(format!("Invalid configuration: {}", err))
            .with_context(format!("Config file: {}", path.display()))
            .with_suggestions([
                "TRY: Base URLs must be absolute http(s) URLs, e.g. http://localhost:8000/api"
                    .to_string(),
                format!("TRY: Fix or delete the config file: {}", path.display()),
                "TRY: Override the base URL for one run: --api-base or SENTILY_API_BASE"
                    .to_string(),
            ])
    }

    /// `--show` pointed past the filtered list
    pub fn record_out_of_range(position: usize, matches: usize) -> Self {
        Self::new(format!("No feedback record at position {}", position))
            .with_context(format!("{} record(s) match the current filters", matches))
            .with_suggestions([
                "TRY: Positions are 1-based, as printed in the # column".to_string(),
                "TRY: List the records first: sentily feedback".to_string(),
            ])
    }

    /// Session file is unreadable
    pub fn session_unreadable(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read session file: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Sign out to reset the session: sentily logout".to_string(),
                format!("TRY: Delete the file: rm {}", path.display()),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Print an error as a JSON object on stdout, for `--json` invocations.
pub fn print_json_error(err: &anyhow::Error) {
    let body = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => serde_json::json!({ "error": helpful }),
        None => serde_json::json!({
            "error": {
                "message": format!("{:#}", err),
                "context": null,
                "suggestions": [],
            }
        }),
    };
    match serde_json::to_string_pretty(&body) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{{\"error\":{{\"message\":\"{}\"}}}}", err),
    }
}
