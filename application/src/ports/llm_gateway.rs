//! LLM Gateway port
//!
//! Defines the interface for communicating with a chat-completion endpoint.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use toolkit_domain::{LlmResponse, Message, SchemaProtocol};

/// Errors that can occur during LLM gateway operations
///
/// These end an agent run. They are never turned into tool messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout")]
    Timeout,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One model round-trip: the full conversation plus every tool schema.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    /// Tool schemas, already rendered for [`LlmGateway::protocol`]
    pub tools: &'a [Value],
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the model endpoint.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Shape this endpoint expects for tool schemas.
    fn protocol(&self) -> SchemaProtocol {
        SchemaProtocol::FunctionCalling
    }

    /// Send the conversation and return the next assistant turn.
    async fn complete(&self, request: ChatRequest<'_>) -> Result<LlmResponse, GatewayError>;
}
