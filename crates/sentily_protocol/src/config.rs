//! API client configuration shared by the CLI and the fetcher.
//!
//! Values come from `~/.sentily/config.toml` when present:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//! feedback_limit = 200
//! page_size = 10
//! request_timeout_secs = 30
//! ```
//!
//! The base URL can be overridden by the caller (CLI flag or
//! `SENTILY_API_BASE`).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::{DEFAULT_API_BASE, DEFAULT_FEEDBACK_LIMIT, DEFAULT_PAGE_SIZE};
use crate::error::ConfigError;

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// `limit` query parameter for `/feedback`
    pub feedback_limit: usize,
    /// Items per explorer page
    pub page_size: usize,
    /// Per-request timeout. `None` leaves the request unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            feedback_limit: DEFAULT_FEEDBACK_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
    feedback_limit: Option<usize>,
    page_size: Option<usize>,
    request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: Default::default(),
            message: e.to_string(),
        })?;

        let defaults = Self::default();
        let config = Self {
            base_url: file.api.base_url.unwrap_or(defaults.base_url),
            feedback_limit: file.api.feedback_limit.unwrap_or(defaults.feedback_limit),
            page_size: file.api.page_size.unwrap_or(defaults.page_size),
            request_timeout_secs: file.api.request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the base URL when an override is given.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url(&self.base_url)?;
        if self.page_size == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "page_size",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Validate a base URL: it must be absolute http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ApiConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.feedback_limit, 200);
        assert_eq!(config.page_size, 10);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ApiConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://feedback.example.com/api"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://feedback.example.com/api");
        assert_eq!(config.feedback_limit, 200);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_empty_file_is_valid() {
        assert_eq!(ApiConfig::from_toml_str("").unwrap(), ApiConfig::default());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = ApiConfig::default()
            .with_base_url(Some("not a url".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let err = parse_base_url("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ApiConfig::from_toml_str("[api]\npage_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: "page_size", .. }));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();
        let err = ApiConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
