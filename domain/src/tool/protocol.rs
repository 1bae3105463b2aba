//! Model-calling protocol shapes for tool schemas.
//!
//! Both shapes are derived purely from a tool's [`InputSchema`](super::schema::InputSchema):
//!
//! ```text
//! FunctionCalling: {"type": "function", "function": {"name", "description", "parameters": <JSON Schema>}}
//! ToolUse:         {"name", "description", "input_schema": <JSON Schema>}
//! ```

use super::entities::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;

/// Target shape for exported tool schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaProtocol {
    /// OpenAI-style function calling (also used by OpenRouter)
    #[default]
    FunctionCalling,
    /// Anthropic-style tool use
    ToolUse,
}

impl SchemaProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaProtocol::FunctionCalling => "function-calling",
            SchemaProtocol::ToolUse => "tool-use",
        }
    }

    /// Render a tool definition in this protocol's shape.
    pub fn render(&self, tool: &ToolDefinition) -> Value {
        let parameters = tool.input_schema.to_json_schema();
        match self {
            SchemaProtocol::FunctionCalling => json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": parameters,
                }
            }),
            SchemaProtocol::ToolUse => json!({
                "name": tool.name,
                "description": tool.description,
                "input_schema": parameters,
            }),
        }
    }
}

impl std::fmt::Display for SchemaProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemaProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "function-calling" | "function_calling" | "openai" => Ok(SchemaProtocol::FunctionCalling),
            "tool-use" | "tool_use" | "anthropic" => Ok(SchemaProtocol::ToolUse),
            other => Err(format!("Unknown schema protocol: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::{InputSchema, OutputSchema, ParamSpec, ParamType};

    fn search_definition() -> ToolDefinition {
        ToolDefinition::new(
            "google_search",
            "Search Google",
            InputSchema::new()
                .with_param(ParamSpec::new("query", "The search query", ParamType::String).required())
                .with_param(
                    ParamSpec::new("num_results", "Number of results (1-10)", ParamType::Integer)
                        .with_default(5)
                        .with_range(1.0, 10.0),
                ),
            OutputSchema::new(),
        )
    }

    fn assert_search_parameters(parameters: &Value) {
        assert_eq!(parameters["type"], "object");
        assert_eq!(parameters["required"], json!(["query"]));
        let num = &parameters["properties"]["num_results"];
        assert_eq!(num["minimum"], json!(1));
        assert_eq!(num["maximum"], json!(10));
        assert_eq!(parameters["properties"]["query"]["type"], "string");
    }

    #[test]
    fn test_function_calling_shape() {
        let schema = search_definition().to_call_schema(SchemaProtocol::FunctionCalling);
        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "google_search");
        assert_eq!(schema["function"]["description"], "Search Google");
        assert_search_parameters(&schema["function"]["parameters"]);
    }

    #[test]
    fn test_tool_use_shape() {
        let schema = search_definition().to_call_schema(SchemaProtocol::ToolUse);
        assert_eq!(schema["name"], "google_search");
        assert!(schema.get("type").is_none());
        assert_search_parameters(&schema["input_schema"]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let definition = search_definition();
        assert_eq!(
            SchemaProtocol::ToolUse.render(&definition),
            SchemaProtocol::ToolUse.render(&definition)
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "function-calling".parse::<SchemaProtocol>().unwrap(),
            SchemaProtocol::FunctionCalling
        );
        assert_eq!("anthropic".parse::<SchemaProtocol>().unwrap(), SchemaProtocol::ToolUse);
        assert!("grpc".parse::<SchemaProtocol>().is_err());
        assert_eq!(SchemaProtocol::default(), SchemaProtocol::FunctionCalling);
    }
}
