//! Agent loop state machine.
//!
//! ```text
//!            begin_turn                 await_tool_results
//!  Running ─────────────▶ Running ─────────────────────────▶ AwaitingToolResults
//!     ▲                      │                                      │
//!     │                      │ finish                               │
//!     │                      ▼                                      │
//!     │                    Done                                     │
//!     └──────────────────── tool_results_delivered ◀────────────────┘
//!
//!  Running with turn_count == max_turns ── abort ──▶ Aborted(MaxTurnsExceeded)
//! ```

use super::value_objects::AbortReason;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of an agent run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    /// Ready to query the model
    Running,
    /// Model requested tools; results are being produced
    AwaitingToolResults,
    /// Model produced a final answer
    Done,
    /// Run stopped without a final answer
    Aborted(AbortReason),
}

impl AgentPhase {
    pub fn as_str(&self) -> &str {
        match self {
            AgentPhase::Running => "running",
            AgentPhase::AwaitingToolResults => "awaiting_tool_results",
            AgentPhase::Done => "done",
            AgentPhase::Aborted(_) => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentPhase::Done | AgentPhase::Aborted(_))
    }
}

impl std::fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Turn accounting and phase for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoopState {
    turn_count: usize,
    max_turns: usize,
    phase: AgentPhase,
}

impl LoopState {
    pub fn new(max_turns: usize) -> Result<Self, DomainError> {
        if max_turns == 0 {
            return Err(DomainError::InvalidMaxTurns);
        }
        Ok(Self {
            turn_count: 0,
            max_turns,
            phase: AgentPhase::Running,
        })
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Another model round-trip is allowed
    pub fn can_continue(&self) -> bool {
        self.phase == AgentPhase::Running && self.turn_count < self.max_turns
    }

    /// Start a turn. Returns the new (1-based) turn number.
    pub fn begin_turn(&mut self) -> Result<usize, DomainError> {
        if !self.can_continue() {
            return Err(self.invalid("running"));
        }
        self.turn_count += 1;
        Ok(self.turn_count)
    }

    pub fn await_tool_results(&mut self) -> Result<(), DomainError> {
        self.transition(AgentPhase::Running, AgentPhase::AwaitingToolResults)
    }

    pub fn tool_results_delivered(&mut self) -> Result<(), DomainError> {
        self.transition(AgentPhase::AwaitingToolResults, AgentPhase::Running)
    }

    pub fn finish(&mut self) -> Result<(), DomainError> {
        self.transition(AgentPhase::Running, AgentPhase::Done)
    }

    /// Stop after the last allowed turn.
    pub fn abort(&mut self) -> Result<AbortReason, DomainError> {
        if self.phase != AgentPhase::Running || self.turn_count < self.max_turns {
            return Err(self.invalid("aborted"));
        }
        self.phase = AgentPhase::Aborted(AbortReason::MaxTurnsExceeded);
        Ok(AbortReason::MaxTurnsExceeded)
    }

    fn transition(&mut self, from: AgentPhase, to: AgentPhase) -> Result<(), DomainError> {
        if self.phase != from {
            return Err(self.invalid(to.as_str()));
        }
        self.phase = to;
        Ok(())
    }

    fn invalid(&self, to: &str) -> DomainError {
        DomainError::InvalidTransition {
            from: self.phase.as_str().to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_turns_rejected() {
        assert_eq!(LoopState::new(0).unwrap_err(), DomainError::InvalidMaxTurns);
    }

    #[test]
    fn test_tool_turn_cycle() {
        let mut state = LoopState::new(3).unwrap();
        assert_eq!(state.begin_turn().unwrap(), 1);
        state.await_tool_results().unwrap();
        assert!(!state.can_continue());
        state.tool_results_delivered().unwrap();
        assert_eq!(state.begin_turn().unwrap(), 2);
        state.finish().unwrap();
        assert_eq!(state.phase(), AgentPhase::Done);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_turn_budget_exhaustion() {
        let mut state = LoopState::new(2).unwrap();
        for _ in 0..2 {
            state.begin_turn().unwrap();
            state.await_tool_results().unwrap();
            state.tool_results_delivered().unwrap();
        }
        assert!(!state.can_continue());
        assert!(state.begin_turn().is_err());
        assert_eq!(state.abort().unwrap(), AbortReason::MaxTurnsExceeded);
        assert_eq!(
            state.phase(),
            AgentPhase::Aborted(AbortReason::MaxTurnsExceeded)
        );
        assert_eq!(state.turn_count(), 2);
    }

    #[test]
    fn test_abort_before_budget_is_invalid() {
        let mut state = LoopState::new(5).unwrap();
        state.begin_turn().unwrap();
        assert!(matches!(
            state.abort(),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_invalid_transitions() {
        let mut state = LoopState::new(1).unwrap();
        assert!(state.tool_results_delivered().is_err());
        state.begin_turn().unwrap();
        state.finish().unwrap();
        let err = state.await_tool_results().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: "done".to_string(),
                to: "awaiting_tool_results".to_string(),
            }
        );
    }
}
