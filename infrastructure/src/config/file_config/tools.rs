//! Tool configuration from TOML (`[search]` and `[fetch]` sections)

use crate::tools::web::{DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT, SERPAPI_ENDPOINT};
use serde::{Deserialize, Serialize};

/// `google_search` settings
///
/// ```toml
/// [search]
/// api_key_env = "SERPAPI_API_KEY"
/// endpoint = "https://serpapi.com/search"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Environment variable holding the SerpAPI key
    pub api_key_env: String,
    pub endpoint: String,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            api_key_env: "SERPAPI_API_KEY".to_string(),
            endpoint: SERPAPI_ENDPOINT.to_string(),
        }
    }
}

/// `web_fetch` settings
///
/// ```toml
/// [fetch]
/// user_agent = "Mozilla/5.0 (compatible; agent-toolkit/0.1.0)"
/// max_body_bytes = 5242880
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFetchConfig {
    pub user_agent: String,
    /// Responses larger than this fail with an execution error
    pub max_body_bytes: usize,
}

impl Default for FileFetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
