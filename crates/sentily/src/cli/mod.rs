//! CLI module for the Sentily feedback explorer
//!
//! Each dashboard view is a subcommand. Commands that talk to the backend
//! share [`ApiContext`], resolved once per invocation from flags, the
//! environment and `~/.sentily/config.toml`.

pub mod error;
pub mod output;

pub mod alerts;
pub mod config;
pub mod facets;
pub mod feedback;
pub mod health;
pub mod session;
pub mod summary;

use anyhow::Result;
use std::future::Future;
use std::path::PathBuf;

use sentily_client::{ApiClient, FetchState, Resource};
use sentily_protocol::{paths, ApiConfig};

use crate::cli::error::HelpfulError;

/// Options shared by every command that reaches the backend.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--api-base` / `SENTILY_API_BASE`
    pub api_base: Option<String>,
}

/// Where the effective base URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseUrlSource {
    Flag,
    ConfigFile,
    Default,
}

/// Resolved configuration plus a ready client.
pub struct ApiContext {
    pub config: ApiConfig,
    pub config_path: PathBuf,
    pub base_url_source: BaseUrlSource,
    pub client: ApiClient,
}

impl ApiContext {
    pub fn resolve(options: &GlobalOptions) -> Result<Self> {
        let config_path = paths::default_config_path();
        let (config, base_url_source) = resolve_config(options, &config_path)?;
        let client = ApiClient::new(&config).map_err(|e| {
            HelpfulError::new("Failed to initialize HTTP client").with_context(e.to_string())
        })?;
        tracing::debug!(base_url = %config.base_url, "resolved API configuration");
        Ok(Self {
            config,
            config_path,
            base_url_source,
            client,
        })
    }

    /// Load `resource` once, turning a failure into a [`HelpfulError`].
    pub fn load<T>(&self, what: &str, mut resource: Resource<T>) -> Result<T> {
        let url = resource.endpoint().url(self.client.base_url());
        block_on(async {
            resource.load(&self.client).await;
        })?;
        match resource.into_state() {
            FetchState::Ready(data) => Ok(data),
            FetchState::Failed(err) => Err(HelpfulError::fetch_failed(what, &url, &err).into()),
            FetchState::Loading => {
                Err(HelpfulError::new(format!("Request for {} never completed", what)).into())
            }
        }
    }
}

/// Flag/env override, then config file, then built-in default.
pub fn resolve_config(
    options: &GlobalOptions,
    config_path: &std::path::Path,
) -> Result<(ApiConfig, BaseUrlSource)> {
    let file_config = ApiConfig::load(config_path)
        .map_err(|e| HelpfulError::invalid_config(&e, config_path))?;
    let file_sets_base = file_config.base_url != ApiConfig::default().base_url;

    let source = if options.api_base.is_some() {
        BaseUrlSource::Flag
    } else if file_sets_base {
        BaseUrlSource::ConfigFile
    } else {
        BaseUrlSource::Default
    };

    let config = file_config
        .with_base_url(options.api_base.clone())
        .map_err(|e| HelpfulError::invalid_config(&e, config_path))?;
    Ok((config, source))
}

/// Run a future on a fresh current-thread runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(future))
}
