//! Ordered tool registry for one agent session.

use super::entities::ToolDefinition;
use super::protocol::SchemaProtocol;
use super::traits::DynTool;
use crate::core::error::DomainError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered collection of tools, addressable by unique name.
///
/// Registration order is preserved: it is the order of [`names`](Self::names)
/// and of the schema list sent to the model.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn DynTool>>,
    definitions: Vec<ToolDefinition>,
    /// Tool name → index into `tools` / `definitions`
    index: HashMap<String, usize>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool (builder pattern). Fails if the name is taken.
    pub fn register<T: DynTool + 'static>(self, tool: T) -> Result<Self, DomainError> {
        self.register_arc(Arc::new(tool))
    }

    /// Register a shared tool (builder pattern). Fails if the name is taken.
    pub fn register_arc(mut self, tool: Arc<dyn DynTool>) -> Result<Self, DomainError> {
        let definition = tool.tool_definition();
        if self.index.contains_key(&definition.name) {
            return Err(DomainError::DuplicateTool(definition.name));
        }
        self.index.insert(definition.name.clone(), self.tools.len());
        self.tools.push(tool);
        self.definitions.push(definition);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn DynTool>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Schemas for every tool, in registration order.
    pub fn call_schemas(&self, protocol: SchemaProtocol) -> Vec<Value> {
        self.definitions
            .iter()
            .map(|d| d.to_call_schema(protocol))
            .collect()
    }
}

impl std::fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::{InputSchema, OutputSchema, ParamSpec, ParamType};
    use crate::tool::value_objects::ToolError;
    use async_trait::async_trait;
    use serde_json::Map;

    struct NamedTool(&'static str);

    #[async_trait]
    impl DynTool for NamedTool {
        fn tool_definition(&self) -> ToolDefinition {
            ToolDefinition::new(
                self.0,
                format!("{} tool", self.0),
                InputSchema::new()
                    .with_param(ParamSpec::new("query", "Query", ParamType::String).required()),
                OutputSchema::new(),
            )
        }

        async fn invoke(&self, _raw_args: &Map<String, Value>) -> Result<Value, ToolError> {
            Ok(serde_json::json!({"tool": self.0}))
        }
    }

    #[test]
    fn test_register_preserves_order() {
        let set = ToolSet::new()
            .register(NamedTool("web_fetch"))
            .unwrap()
            .register(NamedTool("google_search"))
            .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["web_fetch", "google_search"]);
        assert_eq!(set.get("google_search").unwrap().tool_definition().name, "google_search");
        assert!(set.get("unknown").is_none());
        assert_eq!(set.call_schemas(SchemaProtocol::ToolUse)[0]["description"], "web_fetch tool");
    }

    #[test]
    fn test_register_duplicate_name_fails() {
        let result = ToolSet::new()
            .register(NamedTool("google_search"))
            .unwrap()
            .register(NamedTool("google_search"));

        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateTool("google_search".to_string())
        );
    }

    #[test]
    fn test_call_schemas_in_registration_order() {
        let set = ToolSet::new()
            .register(NamedTool("b_tool"))
            .unwrap()
            .register(NamedTool("a_tool"))
            .unwrap();

        let schemas = set.call_schemas(SchemaProtocol::FunctionCalling);
        assert_eq!(schemas[0]["function"]["name"], "b_tool");
        assert_eq!(schemas[1]["function"]["name"], "a_tool");

        let schemas = set.call_schemas(SchemaProtocol::ToolUse);
        assert_eq!(schemas[0]["name"], "b_tool");
    }

    #[tokio::test]
    async fn test_get_and_invoke() {
        let set = ToolSet::new().register(NamedTool("echo")).unwrap();
        let tool = set.get("echo").unwrap();
        let value = tool.invoke(&Map::new()).await.unwrap();
        assert_eq!(value["tool"], "echo");
    }
}
