//! Research Company use case.
//!
//! Seeds the agent loop with the research-analyst prompt for one company and
//! packages the outcome as a [`CompanyReport`].

use crate::config::ExecutionParams;
use crate::ports::agent_progress::AgentProgressNotifier;
use crate::use_cases::run_agent::{RunAgentError, RunAgentInput, RunAgentUseCase};
use serde::Serialize;
use toolkit_domain::{AgentOutcome, ResearchPromptTemplate, TokenUsage};
use tracing::info;

/// Input for [`ResearchCompanyUseCase`].
#[derive(Debug, Clone)]
pub struct ResearchCompanyInput {
    pub company: String,
    pub model: String,
    pub execution: ExecutionParams,
}

impl ResearchCompanyInput {
    pub fn new(company: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            model: model.into(),
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Result of researching one company.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyReport {
    pub company: String,
    pub outcome: AgentOutcome,
    pub turns: usize,
    pub usage: TokenUsage,
}

impl CompanyReport {
    /// Report text, or the incomplete message
    pub fn report(&self) -> &str {
        self.outcome.text()
    }
}

/// Use case for producing a company report with the tool-calling agent.
#[derive(Clone)]
pub struct ResearchCompanyUseCase {
    agent: RunAgentUseCase,
}

impl ResearchCompanyUseCase {
    pub fn new(agent: RunAgentUseCase) -> Self {
        Self { agent }
    }

    pub async fn execute(
        &self,
        input: ResearchCompanyInput,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<CompanyReport, RunAgentError> {
        info!("Researching company: {}", input.company);

        let run = RunAgentInput::new(
            input.model,
            ResearchPromptTemplate::system(),
            ResearchPromptTemplate::task(&input.company),
        )
        .with_execution(input.execution);

        let output = self.agent.execute_with_progress(run, progress).await?;

        Ok(CompanyReport {
            company: input.company,
            outcome: output.outcome,
            turns: output.turns,
            usage: output.usage,
        })
    }
}
