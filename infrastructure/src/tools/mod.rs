//! Tool implementations for the agent system
//!
//! Concrete [`Tool`](toolkit_domain::Tool)s that reach the web, plus the
//! default [`ToolSet`] handed to the research agent.

pub mod web;

pub use web::{GoogleSearchTool, WebFetchTool};

use crate::config::FileConfig;
use thiserror::Error;
use toolkit_domain::{DomainError, ToolSet};

/// Errors raised while constructing tools
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{var} is required. Get one at {hint}")]
    MissingApiKey { var: String, hint: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),

    #[error(transparent)]
    Registry(#[from] DomainError),
}

/// Create the default tool set: `google_search`, then `web_fetch`.
pub fn default_tool_set(config: &FileConfig) -> Result<ToolSet, ConfigurationError> {
    let search = GoogleSearchTool::from_env(&config.search.api_key_env)?
        .with_endpoint(config.search.endpoint.clone());
    let fetch = WebFetchTool::new()?
        .with_user_agent(config.fetch.user_agent.clone())
        .with_max_body_bytes(config.fetch.max_body_bytes);

    Ok(ToolSet::new().register(search)?.register(fetch)?)
}
