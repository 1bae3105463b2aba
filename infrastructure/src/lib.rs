//! Infrastructure layer for agent-toolkit
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the chat-completion gateway, the web tools,
//! the JSONL transcript writer, and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileFetchConfig,
    FileLoggingConfig, FileModelConfig, FileSearchConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::OpenAiCompatibleGateway;
pub use tools::{ConfigurationError, GoogleSearchTool, WebFetchTool, default_tool_set};
