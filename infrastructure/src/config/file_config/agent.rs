//! Agent configuration from TOML (`[agent]` section)

use serde::{Deserialize, Serialize};
use toolkit_application::config::{DEFAULT_INCOMPLETE_MESSAGE, DEFAULT_MAX_TURNS};
use toolkit_application::ExecutionParams;

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_turns = 10
/// incomplete_message = "Research incomplete - reached maximum turns"
/// parallel_tool_calls = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum model round-trips per run
    pub max_turns: usize,
    /// Result text when the turn budget runs out
    pub incomplete_message: String,
    /// Dispatch one turn's tool calls concurrently
    pub parallel_tool_calls: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            incomplete_message: DEFAULT_INCOMPLETE_MESSAGE.to_string(),
            parallel_tool_calls: false,
        }
    }
}

impl FileAgentConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_turns(self.max_turns)
            .with_incomplete_message(self.incomplete_message.clone())
            .with_parallel_tool_calls(self.parallel_tool_calls)
    }
}
