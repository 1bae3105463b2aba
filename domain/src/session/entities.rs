//! Session domain entities

use crate::core::error::DomainError;
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

/// A message in a conversation (Entity)
///
/// Assistant messages may carry tool calls; tool messages carry the id of
/// the call they answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Tool name, set on tool messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    fn with_role(role: Role, content: Option<String>) -> Self {
        Self {
            role,
            content,
            tool_calls: Vec::new(),
            tool_call_id: None,
            name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, Some(content.into()))
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, Some(content.into()))
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, Some(content.into()))
    }

    /// Assistant turn requesting tool calls, with optional accompanying text
    pub fn assistant_with_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::with_role(Role::Assistant, content)
        }
    }

    /// Result of one tool call, correlated by `call_id`
    pub fn tool_result(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            name: Some(tool_name.into()),
            ..Self::with_role(Role::Tool, Some(content.into()))
        }
    }

    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Append-only conversation log (Entity)
///
/// Appending enforces the call/result pairing:
/// - tool-call ids are unique within the conversation
/// - every tool message answers exactly one earlier, still unanswered call
///
/// Messages cannot be modified or removed once appended.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
    #[serde(skip)]
    requested: HashSet<String>,
    #[serde(skip)]
    answered: HashSet<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conversation seeded with a system prompt and the user's task
    pub fn seeded(system_prompt: impl Into<String>, task: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        conversation.messages.push(Message::system(system_prompt));
        conversation.messages.push(Message::user(task));
        conversation
    }

    pub fn append(&mut self, message: Message) -> Result<(), DomainError> {
        match message.role {
            Role::Assistant => {
                let mut seen = HashSet::new();
                for call in &message.tool_calls {
                    if self.requested.contains(&call.id) || !seen.insert(call.id.as_str()) {
                        return Err(DomainError::DuplicateToolCallId(call.id.clone()));
                    }
                }
                self.requested
                    .extend(message.tool_calls.iter().map(|c| c.id.clone()));
            }
            Role::Tool => {
                let id = message
                    .tool_call_id
                    .as_ref()
                    .ok_or(DomainError::MissingToolCallId)?;
                if !self.requested.contains(id) {
                    return Err(DomainError::UnknownToolCallId(id.clone()));
                }
                if self.answered.contains(id) {
                    return Err(DomainError::ToolCallAlreadyAnswered(id.clone()));
                }
                self.answered.insert(id.clone());
            }
            Role::System | Role::User => {}
        }
        self.messages.push(message);
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool messages in the order they were appended
    pub fn tool_results(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role == Role::Tool)
    }

    /// Calls requested by the model that have no result yet
    pub fn pending_tool_calls(&self) -> Vec<&ToolCall> {
        self.messages
            .iter()
            .flat_map(|m| m.tool_calls.iter())
            .filter(|c| !self.answered.contains(&c.id))
            .collect()
    }
}
