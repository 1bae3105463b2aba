//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording agent-run events
//! (model responses, tool calls, tool results) to a structured transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! conversation in a machine-readable format (JSONL). The transcript is
//! write-only; nothing reads it back.

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "model_response", "tool_call").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub const AGENT_START: &'static str = "agent_start";
    pub const MODEL_RESPONSE: &'static str = "model_response";
    pub const TOOL_CALL: &'static str = "tool_call";
    pub const TOOL_RESULT: &'static str = "tool_result";
    pub const AGENT_FINISH: &'static str = "agent_finish";

    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and non-fallible: logging failures never
/// disrupt the agent run.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
