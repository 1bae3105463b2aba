//! Conversation domain.
//!
//! - [`entities::Conversation`]: append-only message log with call/result pairing
//! - [`entities::Message`]: a single message within a conversation
//! - [`response::LlmResponse`]: one assistant turn returned by the model

pub mod entities;
pub mod response;
