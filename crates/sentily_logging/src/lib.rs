//! Logging setup for the Sentily CLI.
//!
//! Two sinks: a daily log file under `~/.sentily/logs/` that records
//! everything the `EnvFilter` admits, and stderr, which stays at `warn`
//! unless the user asks for verbose output. Stdout is left alone so that
//! `--json` output remains machine readable.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use sentily_protocol::paths::default_logs_dir as logs_dir;

const DEFAULT_LOG_FILTER: &str = "sentily=info,sentily_client=info,sentily_explorer=info";
const QUIET_CONSOLE_FILTER: &str = "warn";
/// Daily files kept before the oldest is deleted.
const MAX_LOG_FILES: usize = 7;

/// Logging options for a CLI invocation.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Mirror the file filter on stderr instead of `warn`.
    pub verbose: bool,
    /// Override for the log directory (defaults to `~/.sentily/logs`).
    pub log_dir: Option<PathBuf>,
}

/// Keeps the background file writer alive. Buffered lines are flushed when
/// this is dropped, so hold it until the command finishes.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Install the global subscriber.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let log_dir = config.log_dir.clone().unwrap_or_else(logs_dir);
    let appender = file_appender(&log_dir, config.app_name)?;
    let (file_writer, worker) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(default_filter()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter(config.verbose)),
        )
        .try_init()
        .context("Global tracing subscriber already installed")?;

    Ok(LogGuard { _worker: worker })
}

/// Stderr-only fallback used when the log directory is unusable.
pub fn init_console_only(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter(verbose)),
        )
        .try_init();
}

/// `<dir>/<app_name>.<date>.log`, rotated daily.
fn file_appender(dir: &Path, app_name: &str) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn console_filter(verbose: bool) -> EnvFilter {
    if verbose {
        default_filter()
    } else {
        EnvFilter::new(QUIET_CONSOLE_FILTER)
    }
}
