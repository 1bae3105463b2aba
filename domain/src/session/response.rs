//! Model response types.
//!
//! A chat-completion endpoint returns one assistant turn: either text, or an
//! ordered list of tool calls (optionally with accompanying text).
//!
//! ```text
//! LlmResponse ─┬─ no tool calls ──▶ final answer (text_content)
//!              └─ tool calls ─────▶ dispatch, append results, next turn
//! ```

use super::entities::Message;
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response; the model is done.
    EndTurn,
    /// The model wants to call tools.
    ToolUse,
    /// Hit the token limit; the response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason`.
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "stop" | "end_turn" => StopReason::EndTurn,
            "tool_calls" | "tool_use" | "function_call" => StopReason::ToolUse,
            "length" | "max_tokens" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// Token accounting reported by the endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A structured response from an LLM, supporting both text and tool calls.
///
/// # Examples
///
/// ```
/// use toolkit_domain::session::response::{LlmResponse, StopReason};
/// use toolkit_domain::tool::ToolCall;
///
/// let response = LlmResponse::from_text("Hello!");
/// assert_eq!(response.text_content(), "Hello!");
/// assert!(!response.has_tool_calls());
///
/// let response = LlmResponse::from_tool_calls(vec![
///     ToolCall::new("call_1", "google_search", r#"{"query":"rust"}"#),
/// ]);
/// assert!(response.has_tool_calls());
/// assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl LlmResponse {
    /// Text-only response
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            tool_calls: Vec::new(),
            stop_reason: Some(StopReason::EndTurn),
            model: None,
            usage: None,
        }
    }

    /// Response that only requests tool calls
    pub fn from_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
            stop_reason: Some(StopReason::ToolUse),
            model: None,
            usage: None,
        }
    }

    /// Response text, or `""` when the model sent none.
    pub fn text_content(&self) -> String {
        self.content.clone().unwrap_or_default()
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Convert into the assistant message appended to the conversation.
    pub fn into_message(self) -> Message {
        if self.tool_calls.is_empty() {
            Message::assistant(self.content.unwrap_or_default())
        } else {
            Message::assistant_with_tool_calls(self.content, self.tool_calls)
        }
    }
}
