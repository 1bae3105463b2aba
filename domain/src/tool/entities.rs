//! Tool domain entities

use super::protocol::SchemaProtocol;
use super::schema::{InputSchema, OutputSchema};
use super::value_objects::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Definition of a tool that can be offered to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "google_search")
    pub name: String,
    /// LLM-facing description
    pub description: String,
    /// Accepted parameters
    pub input_schema: InputSchema,
    /// Shape of the result
    pub output_schema: OutputSchema,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
        output_schema: OutputSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema,
        }
    }

    /// Render this tool for a model-calling protocol.
    pub fn to_call_schema(&self, protocol: SchemaProtocol) -> Value {
        protocol.render(self)
    }
}

/// A model-issued request to invoke a tool.
///
/// `arguments` is kept exactly as the model sent it (a JSON-encoded object);
/// parsing happens at dispatch time so malformed payloads become tool errors
/// instead of transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier assigned by the model endpoint, echoed back in the tool result
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// JSON-encoded argument object
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Build a call from structured arguments (used by tests and stubs).
    pub fn with_json(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self::new(id, name, arguments.to_string())
    }

    /// Parse the argument string into a JSON object.
    ///
    /// An empty or whitespace-only string is treated as `{}`; some endpoints
    /// send that for calls without parameters.
    pub fn parse_arguments(&self) -> Result<Map<String, Value>, ToolError> {
        if self.arguments.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&self.arguments) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ToolError::malformed_arguments(
                &self.name,
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
            Err(e) => Err(ToolError::malformed_arguments(
                &self.name,
                format!("arguments are not valid JSON ({})", e),
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
