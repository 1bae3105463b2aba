//! Tool domain value objects: the error taxonomy.
//!
//! Every failure a tool can report is one of four [`ToolError`] variants:
//!
//! | Variant | Raised by | Typical cause |
//! |---------|-----------|---------------|
//! | `Validation` | the contract layer | missing / mistyped / out-of-range argument |
//! | `Authentication` | the tool | upstream credential rejected (HTTP 401) |
//! | `RateLimited` | the tool | upstream throttling (HTTP 429) |
//! | `Execution` | the tool | network, HTTP or parse failure |
//!
//! `Validation` never reaches a tool's `execute`. All four propagate
//! unchanged out of `validate_and_execute`; the agent loop turns each into a
//! `{"error": <message>}` tool result.

use super::schema::{Constraint, Violation};
use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a [`ToolError`], used for logging and progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Authentication,
    RateLimited,
    Validation,
    Execution,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Execution => "execution",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error that occurred while validating or executing a tool.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ToolError {
    /// Upstream credential rejected
    #[error("{message}")]
    Authentication { message: String, status: Option<u16> },

    /// Upstream throttling
    #[error("{message}")]
    RateLimited { message: String, status: Option<u16> },

    /// Caller-supplied arguments failed the input schema
    #[error("{message}")]
    Validation {
        message: String,
        violations: Vec<Violation>,
    },

    /// Catch-all for failures inside the tool
    #[error("{message}")]
    Execution { message: String, status: Option<u16> },
}

impl ToolError {
    pub fn authentication(message: impl Into<String>) -> Self {
        ToolError::Authentication {
            message: message.into(),
            status: None,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        ToolError::RateLimited {
            message: message.into(),
            status: None,
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        ToolError::Execution {
            message: message.into(),
            status: None,
        }
    }

    /// Build a validation error for `tool` from the schema violations found.
    pub fn validation(tool: &str, violations: Vec<Violation>) -> Self {
        let details = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        ToolError::Validation {
            message: format!("Invalid arguments for {}: {}", tool, details),
            violations,
        }
    }

    /// Validation error for an argument payload that could not be used at all
    /// (not JSON, not an object, or not convertible into the typed input).
    pub fn malformed_arguments(tool: &str, reason: impl Into<String>) -> Self {
        Self::validation(
            tool,
            vec![Violation::new(
                "arguments",
                Constraint::Malformed {
                    reason: reason.into(),
                },
            )],
        )
    }

    /// Attach the HTTP status that triggered this error.
    ///
    /// Has no effect on `Validation`, which never originates upstream.
    pub fn with_status(mut self, code: u16) -> Self {
        match &mut self {
            ToolError::Authentication { status, .. }
            | ToolError::RateLimited { status, .. }
            | ToolError::Execution { status, .. } => *status = Some(code),
            ToolError::Validation { .. } => {}
        }
        self
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::Authentication { .. } => ErrorCategory::Authentication,
            ToolError::RateLimited { .. } => ErrorCategory::RateLimited,
            ToolError::Validation { .. } => ErrorCategory::Validation,
            ToolError::Execution { .. } => ErrorCategory::Execution,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ToolError::Authentication { message, .. }
            | ToolError::RateLimited { message, .. }
            | ToolError::Validation { message, .. }
            | ToolError::Execution { message, .. } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ToolError::Authentication { status, .. }
            | ToolError::RateLimited { status, .. }
            | ToolError::Execution { status, .. } => *status,
            ToolError::Validation { .. } => None,
        }
    }

    /// The JSON payload the model sees in the tool result: `{"error": <message>}`.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.message() })
    }
}
