//! HTTP API surface of the feedback backend.
//!
//! The backend is an opaque JSON service; these types only describe which
//! paths exist and which query parameters each accepts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::defaults::DEFAULT_FEEDBACK_LIMIT;

/// A GET endpoint of the feedback API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Aggregate counters and trend series
    Summary,
    /// Raw feedback objects, newest first
    Feedback { limit: usize },
    /// Raw alert objects, optionally narrowed server-side
    Alerts {
        urgency: Option<String>,
        feedback_type: Option<String>,
    },
    /// Liveness check
    Health,
}

impl Endpoint {
    pub fn feedback(limit: usize) -> Self {
        Endpoint::Feedback { limit }
    }

    pub fn alerts(urgency: Option<String>, feedback_type: Option<String>) -> Self {
        Endpoint::Alerts {
            urgency,
            feedback_type,
        }
    }

    /// Path relative to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Summary => "/summary",
            Endpoint::Feedback { .. } => "/feedback",
            Endpoint::Alerts { .. } => "/alerts",
            Endpoint::Health => "/health",
        }
    }

    /// Query parameters. Empty optional values are omitted entirely.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Summary | Endpoint::Health => Vec::new(),
            Endpoint::Feedback { limit } => vec![("limit", limit.to_string())],
            Endpoint::Alerts {
                urgency,
                feedback_type,
            } => {
                let mut params = Vec::new();
                if let Some(u) = urgency.as_deref().filter(|u| !u.is_empty()) {
                    params.push(("urgency", u.to_string()));
                }
                if let Some(t) = feedback_type.as_deref().filter(|t| !t.is_empty()) {
                    params.push(("feedback_type", t.to_string()));
                }
                params
            }
        }
    }

    /// Full URL for display and logging.
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path());
        let query = self.query();
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(k, v)| {
                    let value: String =
                        url::form_urlencoded::byte_serialize(v.as_bytes()).collect();
                    format!("{}={}", k, value)
                })
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }
        url
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::feedback(DEFAULT_FEEDBACK_LIMIT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path())
    }
}

/// Liveness payload. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}
