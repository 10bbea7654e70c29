//! Error types for the fetch boundary and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single API request.
///
/// Every variant is recoverable: callers store it in view state and render
/// it, they never propagate it as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never reached the server (DNS, refused connection, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    RequestFailed { status: u16 },

    /// The body was not valid JSON, or not the shape the view needs.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// True when the server was reached; parse failures count as request failures.
    pub fn server_reached(&self) -> bool {
        matches!(self, FetchError::RequestFailed { .. } | FetchError::Parse(_))
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Invalid setting {key}: {message}")]
    InvalidSetting { key: &'static str, message: String },
}
