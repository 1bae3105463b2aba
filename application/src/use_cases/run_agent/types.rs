//! Type definitions for the RunAgent use case.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::GatewayError;
use thiserror::Error;
use toolkit_domain::{AgentOutcome, Conversation, DomainError, TokenUsage};

/// Errors that end an agent run.
///
/// Tool failures are not here: they become error tool messages and the run
/// continues.
#[derive(Error, Debug)]
pub enum RunAgentError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Conversation error: {0}")]
    Conversation(#[from] DomainError),
}

/// Input for the [`RunAgentUseCase`](super::RunAgentUseCase).
#[derive(Debug, Clone)]
pub struct RunAgentInput {
    /// Model identifier sent to the endpoint
    pub model: String,
    pub system_prompt: String,
    /// The user's task
    pub task: String,
    pub execution: ExecutionParams,
}

impl RunAgentInput {
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            task: task.into(),
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Output of a finished run.
#[derive(Debug, Clone)]
pub struct RunAgentOutput {
    pub outcome: AgentOutcome,
    /// Model round-trips performed
    pub turns: usize,
    /// Full message history of the run
    pub conversation: Conversation,
    /// Token usage summed over every turn that reported it
    pub usage: TokenUsage,
}

impl RunAgentOutput {
    /// The text handed back to the caller
    pub fn text(&self) -> &str {
        self.outcome.text()
    }
}
