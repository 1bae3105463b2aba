//! Execution parameters: agent loop control.
//!
//! [`ExecutionParams`] groups the static parameters that control the
//! loop in [`RunAgentUseCase`](crate::use_cases::run_agent::RunAgentUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TURNS: usize = 10;
pub const DEFAULT_INCOMPLETE_MESSAGE: &str = "Research incomplete - reached maximum turns";

/// Agent loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum model round-trips in one run.
    pub max_turns: usize,
    /// Result text when `max_turns` is reached without a final answer.
    pub incomplete_message: String,
    /// Dispatch the calls of one turn concurrently.
    pub parallel_tool_calls: bool,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            incomplete_message: DEFAULT_INCOMPLETE_MESSAGE.to_string(),
            parallel_tool_calls: false,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_incomplete_message(mut self, message: impl Into<String>) -> Self {
        self.incomplete_message = message.into();
        self
    }

    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = parallel;
        self
    }
}
