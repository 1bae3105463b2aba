//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agent;
mod logging;
mod model;
mod tools;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use model::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_MODEL_API_KEY_ENV, DEFAULT_MODEL_TIMEOUT_SECS,
    FileModelConfig,
};
pub use tools::{FileFetchConfig, FileSearchConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("agent.max_turns must be at least 1")]
    InvalidMaxTurns,

    #[error("model.name cannot be empty")]
    EmptyModelName,

    #[error("model.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("model.timeout_secs must be at least 1")]
    InvalidModelTimeout,

    #[error("fetch.max_body_bytes must be at least 1")]
    InvalidMaxBodyBytes,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completion endpoint
    pub model: FileModelConfig,
    /// Agent loop settings
    pub agent: FileAgentConfig,
    /// `google_search` settings
    pub search: FileSearchConfig,
    /// `web_fetch` settings
    pub fetch: FileFetchConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.agent.max_turns == 0 {
            return Err(ConfigValidationError::InvalidMaxTurns);
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.model.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidModelTimeout);
        }
        if self.fetch.max_body_bytes == 0 {
            return Err(ConfigValidationError::InvalidMaxBodyBytes);
        }
        Ok(())
    }

    /// Render as TOML (for `--show-config`)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
