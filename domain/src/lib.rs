//! Domain layer for agent-toolkit
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool Contract
//!
//! A tool is a named capability with a typed input, a typed output and a
//! schema that drives validation, defaulting and export to model-calling
//! protocols. See [`tool`].
//!
//! ## Conversation and Loop State
//!
//! - **Conversation**: append-only log pairing every tool result with the
//!   call that requested it
//! - **LoopState**: turn budget and phase (`Running`, `AwaitingToolResults`,
//!   `Done`, `Aborted`) of one agent run

pub mod agent;
pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use agent::{
    state::{AgentPhase, LoopState},
    value_objects::{AbortReason, AgentOutcome},
};
pub use core::error::DomainError;
pub use prompt::{DEFAULT_COMPANY, ResearchPromptTemplate};
pub use session::{
    entities::{Conversation, Message, Role},
    response::{LlmResponse, StopReason, TokenUsage},
};
pub use tool::{
    entities::{ToolCall, ToolDefinition},
    protocol::SchemaProtocol,
    schema::{
        Constraint, FieldSpec, FieldType, InputSchema, OutputSchema, ParamSpec, ParamType,
        Violation,
    },
    set::ToolSet,
    traits::{DynTool, Tool},
    value_objects::{ErrorCategory, ToolError},
};
