//! Configuration file loading for agent-toolkit
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `AGENT_TOOLKIT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./agent-toolkit.toml` or `./.agent-toolkit.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agent-toolkit/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_MODEL_API_KEY_ENV,
    DEFAULT_MODEL_TIMEOUT_SECS, FileAgentConfig, FileConfig, FileFetchConfig, FileLoggingConfig, FileModelConfig,
    FileSearchConfig,
};
pub use loader::ConfigLoader;
