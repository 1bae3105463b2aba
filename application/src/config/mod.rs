//! Application-level configuration.
//!
//! - [`ExecutionParams`]: agent loop control (turn budget, sentinel, dispatch mode)

pub mod execution_params;

pub use execution_params::{DEFAULT_INCOMPLETE_MESSAGE, DEFAULT_MAX_TURNS, ExecutionParams};
