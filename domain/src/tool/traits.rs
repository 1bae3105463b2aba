//! Tool domain traits
//!
//! [`Tool`] is the extension point: a new capability supplies its identity,
//! its schemas and [`Tool::execute`]. Validation, defaulting and schema export
//! are provided methods driven by the schemas, so every tool gets them for free.
//!
//! [`DynTool`] is the object-safe view used by [`ToolSet`](super::set::ToolSet)
//! to hold heterogeneous tools behind `Arc<dyn DynTool>`. Every `Tool` is a
//! `DynTool` through a blanket impl.

use super::entities::ToolDefinition;
use super::protocol::SchemaProtocol;
use super::schema::{InputSchema, OutputSchema};
use super::value_objects::ToolError;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A named, schema-described capability with typed input and output.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
/// use toolkit_domain::tool::schema::*;
/// use toolkit_domain::tool::{Tool, ToolError};
///
/// #[derive(Deserialize)]
/// struct EchoInput { message: String }
///
/// #[derive(Serialize)]
/// struct EchoOutput { message: String }
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     type Input = EchoInput;
///     type Output = EchoOutput;
///
///     fn name(&self) -> &str { "echo" }
///     fn description(&self) -> &str { "Echo a message back" }
///     fn input_schema(&self) -> InputSchema {
///         InputSchema::new()
///             .with_param(ParamSpec::new("message", "Text to echo", ParamType::String).required())
///     }
///     fn output_schema(&self) -> OutputSchema {
///         OutputSchema::new().with_field(FieldSpec::new("message", "Echoed text", FieldType::String))
///     }
///     async fn execute(&self, input: EchoInput) -> Result<EchoOutput, ToolError> {
///         Ok(EchoOutput { message: input.message })
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Typed input, deserialized from schema-validated arguments
    type Input: DeserializeOwned + Send;
    /// Typed output, serialized into the tool result
    type Output: Serialize + Send;

    /// Unique name, stable across a session
    fn name(&self) -> &str;

    /// LLM-facing documentation
    fn description(&self) -> &str;

    fn input_schema(&self) -> InputSchema;

    fn output_schema(&self) -> OutputSchema;

    /// Run the tool on already-validated input.
    ///
    /// Must not re-validate. Failures are reported as `Authentication`,
    /// `RateLimited` or `Execution`.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, ToolError>;

    /// Validate raw arguments against the input schema, then execute.
    ///
    /// On a schema violation this fails with [`ToolError::Validation`] and
    /// [`execute`](Self::execute) is never called. Errors from `execute`
    /// propagate unchanged.
    async fn validate_and_execute(
        &self,
        raw_args: &Map<String, Value>,
    ) -> Result<Self::Output, ToolError> {
        let normalized = self
            .input_schema()
            .validate(raw_args)
            .map_err(|violations| ToolError::validation(self.name(), violations))?;

        let input: Self::Input = serde_json::from_value(Value::Object(normalized))
            .map_err(|e| ToolError::malformed_arguments(self.name(), e.to_string()))?;

        self.execute(input).await
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            self.name(),
            self.description(),
            self.input_schema(),
            self.output_schema(),
        )
    }

    /// Export this tool's schema for a model-calling protocol.
    fn to_call_schema(&self, protocol: SchemaProtocol) -> Value {
        protocol.render(&self.definition())
    }
}

/// Object-safe tool interface with JSON-in / JSON-out invocation.
#[async_trait]
pub trait DynTool: Send + Sync {
    fn tool_definition(&self) -> ToolDefinition;

    /// Validate, execute and serialize the typed output.
    async fn invoke(&self, raw_args: &Map<String, Value>) -> Result<Value, ToolError>;
}

#[async_trait]
impl<T> DynTool for T
where
    T: Tool,
{
    fn tool_definition(&self) -> ToolDefinition {
        Tool::definition(self)
    }

    async fn invoke(&self, raw_args: &Map<String, Value>) -> Result<Value, ToolError> {
        let output = self.validate_and_execute(raw_args).await?;
        serde_json::to_value(output).map_err(|e| {
            ToolError::execution(format!("Failed to serialize {} output: {}", self.name(), e))
        })
    }
}
