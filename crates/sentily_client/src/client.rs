//! HTTP client for the feedback backend.
//!
//! One GET per call, no retry. Failures are returned as [`FetchError`] and
//! logged here so that callers only have to decide how to display them.

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

use sentily_explorer::{alerts_from_json, records_from_json, DashboardSummary, FeedbackRecord};
use sentily_protocol::{ApiConfig, Endpoint, FetchError, HealthResponse};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from resolved configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::with_timeout(&config.base_url, config.request_timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::transport(error_chain(&e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and return the JSON body verbatim.
    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        tracing::debug!("{} -> {}", endpoint, endpoint.url(&self.base_url));

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .query(&endpoint.query())
            .send()
            .await
            .map_err(|e| {
                let err = FetchError::transport(error_chain(&e));
                tracing::error!("Error fetching data from {}: {}", endpoint.path(), err);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let err = FetchError::RequestFailed {
                status: status.as_u16(),
            };
            tracing::error!("Error fetching data from {}: {}", endpoint.path(), err);
            return Err(err);
        }

        let body = response.text().await.map_err(|e| {
            let err = FetchError::transport(error_chain(&e));
            tracing::error!("Error reading body from {}: {}", endpoint.path(), err);
            err
        })?;

        serde_json::from_str(&body).map_err(|e| {
            let err = FetchError::parse(e.to_string());
            tracing::error!("Error parsing body from {}: {}", endpoint.path(), err);
            err
        })
    }

    pub async fn summary(&self) -> Result<DashboardSummary, FetchError> {
        let body = self.fetch(&Endpoint::Summary).await?;
        Ok(DashboardSummary::from_json(&body))
    }

    pub async fn feedback(&self, limit: usize) -> Result<Vec<FeedbackRecord>, FetchError> {
        let body = self.fetch(&Endpoint::feedback(limit)).await?;
        records_from_json(&body)
    }

    pub async fn alerts(
        &self,
        urgency: Option<String>,
        feedback_type: Option<String>,
    ) -> Result<Vec<FeedbackRecord>, FetchError> {
        let body = self.fetch(&Endpoint::alerts(urgency, feedback_type)).await?;
        alerts_from_json(&body)
    }

    pub async fn health(&self) -> Result<HealthResponse, FetchError> {
        let body = self.fetch(&Endpoint::Health).await?;
        decode_health(&body)
    }
}

pub(crate) fn decode_health(body: &Value) -> Result<HealthResponse, FetchError> {
    serde_json::from_value(body.clone()).map_err(|e| FetchError::parse(e.to_string()))
}

/// `reqwest::Error` displays only its outermost layer; the cause (refused
/// connection, timeout) lives in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_is_trimmed() {
        let client = ApiClient::with_timeout("http://localhost:8000/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_new_uses_config() {
        let config = ApiConfig {
            request_timeout_secs: Some(3),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_decode_health() {
        let health = decode_health(&json!({"status": "Backend is running"})).unwrap();
        assert_eq!(health.status, "Backend is running");
        assert!(matches!(decode_health(&json!("up")), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "refused");
        assert_eq!(error_chain(&io), "refused");
    }
}
