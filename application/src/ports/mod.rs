//! Ports (interfaces) for external dependencies
//!
//! Ports define the boundaries between the application layer and
//! infrastructure/presentation layers.

pub mod agent_progress;
pub mod conversation_logger;
pub mod llm_gateway;
