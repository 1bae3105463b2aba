//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are invariant violations of the tool registry, the conversation log
/// or the agent loop state machine. Tool failures are *not* domain errors;
/// they are reported through [`ToolError`](crate::tool::ToolError).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Duplicate tool call id in conversation: {0}")]
    DuplicateToolCallId(String),

    #[error("Tool result references unknown tool call id: {0}")]
    UnknownToolCallId(String),

    #[error("Tool call {0} already has a result")]
    ToolCallAlreadyAnswered(String),

    #[error("Tool result message is missing a tool call id")]
    MissingToolCallId,

    #[error("max_turns must be at least 1")]
    InvalidMaxTurns,

    #[error("Invalid agent phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Check if this error was raised by the conversation log
    pub fn is_conversation_error(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateToolCallId(_)
                | DomainError::UnknownToolCallId(_)
                | DomainError::ToolCallAlreadyAnswered(_)
                | DomainError::MissingToolCallId
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_tool_display() {
        let error = DomainError::DuplicateTool("google_search".to_string());
        assert_eq!(error.to_string(), "Tool already registered: google_search");
    }

    #[test]
    fn test_is_conversation_error() {
        assert!(DomainError::UnknownToolCallId("call_1".to_string()).is_conversation_error());
        assert!(DomainError::MissingToolCallId.is_conversation_error());
        assert!(!DomainError::InvalidMaxTurns.is_conversation_error());
        assert!(!DomainError::DuplicateTool("x".to_string()).is_conversation_error());
    }
}
