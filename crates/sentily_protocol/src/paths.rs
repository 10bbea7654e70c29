use std::path::PathBuf;

use crate::defaults::{CONFIG_FILE_NAME, HOME_DIR_NAME, HOME_ENV, SESSION_FILE_NAME};

/// Resolve the Sentily home directory.
///
/// Priority:
/// 1) SENTILY_HOME
/// 2) HOME/USERPROFILE
/// 3) ./.sentily
pub fn sentily_home() -> PathBuf {
    if let Ok(override_path) = std::env::var(HOME_ENV) {
        return PathBuf::from(override_path);
    }
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home).join(HOME_DIR_NAME);
    }
    PathBuf::from(".").join(HOME_DIR_NAME)
}

/// Default config file path: ~/.sentily/config.toml
pub fn default_config_path() -> PathBuf {
    sentily_home().join(CONFIG_FILE_NAME)
}

/// Default session file path: ~/.sentily/session.toml
pub fn default_session_path() -> PathBuf {
    sentily_home().join(SESSION_FILE_NAME)
}

/// Default logs directory: ~/.sentily/logs
pub fn default_logs_dir() -> PathBuf {
    sentily_home().join("logs")
}
