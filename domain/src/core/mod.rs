//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: registry, conversation and state machine invariant violations

pub mod error;
