//! Canonical default values shared by the client and the CLI.

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_FEEDBACK_LIMIT: usize = 200;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const API_BASE_ENV: &str = "SENTILY_API_BASE";
pub const HOME_ENV: &str = "SENTILY_HOME";
pub const HOME_DIR_NAME: &str = ".sentily";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session.toml";
