//! Prompt domain
//!
//! Seed messages for agent runs.

pub mod research;

pub use research::{DEFAULT_COMPANY, ResearchPromptTemplate};
