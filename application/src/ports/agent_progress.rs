//! Agent execution progress port.
//!
//! [`AgentProgressNotifier`] is an **output port** that the presentation layer
//! implements to display real-time agent execution progress to the user.
//! All callback argument types come from the domain layer.
//!
//! # Example Implementation
//!
//! ```ignore
//! use toolkit_application::ports::agent_progress::AgentProgressNotifier;
//!
//! struct MyProgress;
//!
//! impl AgentProgressNotifier for MyProgress {
//!     fn on_turn_start(&self, turn: usize, max_turns: usize) {
//!         println!("Turn {}/{}", turn, max_turns);
//!     }
//! }
//! ```

use toolkit_domain::{AgentOutcome, AgentPhase, ErrorCategory};

/// Progress notifier for agent execution.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
pub trait AgentProgressNotifier: Send + Sync {
    /// Called once before the first model round-trip
    fn on_run_start(&self, _model: &str, _max_turns: usize) {}

    /// Called when the loop changes phase
    fn on_phase_change(&self, _phase: &AgentPhase) {}

    /// Called before each model round-trip
    fn on_turn_start(&self, _turn: usize, _max_turns: usize) {}

    /// Called when the model answered; `tool_calls` is the number of requested calls
    fn on_model_response(&self, _turn: usize, _tool_calls: usize) {}

    /// Called when a tool is invoked
    fn on_tool_call(&self, _tool_name: &str, _args_preview: &str) {}

    /// Called when a tool returns successfully
    fn on_tool_result(&self, _tool_name: &str, _duration_ms: u64) {}

    /// Called when a tool call fails with details about the error
    fn on_tool_error(&self, _tool_name: &str, _category: ErrorCategory, _message: &str) {}

    /// Called when the model asks for a tool that is not registered
    fn on_tool_not_found(&self, _tool_name: &str, _available_tools: &[&str]) {}

    /// Called once with the final outcome
    fn on_run_complete(&self, _outcome: &AgentOutcome, _turns: usize) {}
}

/// No-op progress notifier
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
