//! Tool domain module
//!
//! This module defines the **tool contract**: how an agent invokes external
//! capabilities through a validated, schema-described interface.
//!
//! # Overview
//!
//! Every tool is described by a [`ToolDefinition`] (name, description, input
//! and output schema), invoked via a model-issued [`ToolCall`], and either
//! returns a typed output or fails with a [`ToolError`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────────┐    ┌──────────────┐
//! │ ToolCall     │───▶│ validate_and_execute │───▶│ Output / Err │
//! │ (raw JSON)   │    │  schema → execute    │    │ (typed)      │
//! └──────────────┘    └──────────┬───────────┘    └──────────────┘
//!                                │
//!                     InputSchema: validate + defaults + export
//! ```
//!
//! # Single Source of Truth
//!
//! An [`InputSchema`](schema::InputSchema) drives three things: argument
//! validation, default filling, and the JSON Schema handed to the model in
//! either [`SchemaProtocol`] shape. Adding a parameter in one place updates
//! all three.
//!
//! # Key Types
//!
//! - [`Tool`]: extension point: implement `execute`, get validation and export
//! - [`DynTool`]: object-safe JSON-in / JSON-out view of any `Tool`
//! - [`ToolSet`]: ordered, name-unique registry for one session
//! - [`ToolError`]: `Authentication` / `RateLimited` / `Validation` / `Execution`
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions and validation, no I/O
//! - **Application**: the agent loop dispatches [`ToolCall`]s through a [`ToolSet`]
//! - **Infrastructure**: concrete tools (`google_search`, `web_fetch`) doing HTTP

pub mod entities;
pub mod protocol;
pub mod schema;
pub mod set;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition};
pub use protocol::SchemaProtocol;
pub use set::ToolSet;
pub use traits::{DynTool, Tool};
pub use value_objects::{ErrorCategory, ToolError};
