//! Value objects for the agent loop

use serde::{Deserialize, Serialize};

/// Why a run stopped without a final answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    MaxTurnsExceeded,
}

impl AbortReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortReason::MaxTurnsExceeded => "max_turns_exceeded",
        }
    }
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of an agent run.
///
/// Running out of turns is a normal outcome carrying the configured
/// "incomplete" message, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentOutcome {
    Completed { answer: String },
    Incomplete { message: String, reason: AbortReason },
}

impl AgentOutcome {
    /// The text handed back to the caller
    pub fn text(&self) -> &str {
        match self {
            AgentOutcome::Completed { answer } => answer,
            AgentOutcome::Incomplete { message, .. } => message,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AgentOutcome::Completed { .. })
    }

    pub fn into_text(self) -> String {
        match self {
            AgentOutcome::Completed { answer } => answer,
            AgentOutcome::Incomplete { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_text() {
        let done = AgentOutcome::Completed {
            answer: "Report".to_string(),
        };
        assert_eq!(done.text(), "Report");
        assert!(done.is_completed());

        let incomplete = AgentOutcome::Incomplete {
            message: "Research incomplete - reached maximum turns".to_string(),
            reason: AbortReason::MaxTurnsExceeded,
        };
        assert!(!incomplete.is_completed());
        assert_eq!(
            incomplete.into_text(),
            "Research incomplete - reached maximum turns"
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(AgentOutcome::Incomplete {
            message: "stop".to_string(),
            reason: AbortReason::MaxTurnsExceeded,
        })
        .unwrap();
        assert_eq!(json["status"], "incomplete");
        assert_eq!(json["reason"], "max_turns_exceeded");
    }
}
