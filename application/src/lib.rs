//! Application layer for agent-toolkit
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ChatRequest, GatewayError, LlmGateway},
};
pub use use_cases::research_company::{
    CompanyReport, ResearchCompanyInput, ResearchCompanyUseCase,
};
pub use use_cases::run_agent::{
    DispatchFailure, RunAgentError, RunAgentInput, RunAgentOutput, RunAgentUseCase,
    ToolDispatch, dispatch_tool_call,
};
