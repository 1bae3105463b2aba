//! Agent domain module
//!
//! Turn accounting and outcomes for the tool-calling loop.

pub mod state;
pub mod value_objects;

pub use state::{AgentPhase, LoopState};
pub use value_objects::{AbortReason, AgentOutcome};
