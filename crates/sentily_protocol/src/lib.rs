//! Shared vocabulary of the Sentily client: endpoint table, configuration,
//! home-directory paths and the fetch error taxonomy.

pub mod config;
pub mod defaults;
pub mod error;
pub mod http_types;
pub mod paths;

pub use config::{parse_base_url, ApiConfig};
pub use error::{ConfigError, FetchError};
pub use http_types::{Endpoint, HealthResponse};
