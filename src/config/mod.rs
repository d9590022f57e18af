#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{LoggingSettings, ServerConfig};

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Largest page size the AIC API serves.
pub const MAX_RESULTS: u32 = 100;
pub const DEFAULT_USER_AGENT: &str = concat!("aic-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Settings for talking to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub max_limit: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_limit: MAX_RESULTS,
        }
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validate_range("api.max_limit", self.max_limit, 1, MAX_RESULTS)?;
        validate_non_empty_string("api.user_agent", &self.user_agent)?;
        Ok(())
    }
}
