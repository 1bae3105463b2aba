//! Model endpoint configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};
use crate::providers::DEFAULT_COMPLETION_TIMEOUT;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-sonnet";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = DEFAULT_COMPLETION_TIMEOUT.as_secs();

/// Raw model configuration from TOML
///
/// ```toml
/// [model]
/// name = "anthropic/claude-3.5-sonnet"
/// base_url = "https://openrouter.ai/api/v1"
/// api_key_env = "OPENROUTER_API_KEY"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier sent to the endpoint
    pub name: String,
    /// OpenAI-compatible API base URL (without `/chat/completions`)
    pub base_url: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    /// Per-request timeout for one completion
    pub timeout_secs: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_MODEL_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
        }
    }
}

impl FileModelConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
