//! Tool call dispatch.
//!
//! Dispatch never fails: every outcome (success, unknown tool, malformed
//! arguments, tool error) becomes a JSON payload for the tool message. The
//! failure, if any, is kept alongside for logging and progress display.

use serde_json::{Value, json};
use std::time::Instant;
use toolkit_domain::{ToolCall, ToolError, ToolSet};

/// Why a dispatched call did not produce tool output
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchFailure {
    UnknownTool,
    Tool(ToolError),
}

/// Outcome of one tool call
#[derive(Debug, Clone)]
pub struct ToolDispatch {
    pub call_id: String,
    pub tool_name: String,
    /// Content of the tool message
    pub payload: Value,
    pub failure: Option<DispatchFailure>,
    pub duration_ms: u64,
}

impl ToolDispatch {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

fn unknown_tool_message(name: &str) -> String {
    format!("Unknown tool: {}", name)
}

/// Resolve, validate and run one call against `tools`.
pub async fn dispatch_tool_call(tools: &ToolSet, call: &ToolCall) -> ToolDispatch {
    let started = Instant::now();
    let (payload, failure) = match run_call(tools, call).await {
        Ok(output) => (output, None),
        Err(DispatchFailure::UnknownTool) => (
            json!({ "error": unknown_tool_message(&call.name) }),
            Some(DispatchFailure::UnknownTool),
        ),
        Err(DispatchFailure::Tool(e)) => (e.to_payload(), Some(DispatchFailure::Tool(e))),
    };

    ToolDispatch {
        call_id: call.id.clone(),
        tool_name: call.name.clone(),
        payload,
        failure,
        duration_ms: started.elapsed().as_millis() as u64,
    }
}

async fn run_call(tools: &ToolSet, call: &ToolCall) -> Result<Value, DispatchFailure> {
    let tool = tools.get(&call.name).ok_or(DispatchFailure::UnknownTool)?;
    let args = call.parse_arguments().map_err(DispatchFailure::Tool)?;
    tool.invoke(&args).await.map_err(DispatchFailure::Tool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::run_agent::test_support::{EchoTool, FailingTool};
    use toolkit_domain::ErrorCategory;

    fn tools() -> ToolSet {
        ToolSet::new()
            .register(EchoTool::new())
            .unwrap()
            .register(FailingTool::rate_limited())
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_payload_is_tool_output() {
        let call = ToolCall::with_json("c1", "echo", json!({"query": "rust"}));
        let dispatch = dispatch_tool_call(&tools(), &call).await;
        assert!(dispatch.is_success());
        assert_eq!(dispatch.call_id, "c1");
        assert_eq!(dispatch.payload, json!({"query": "rust", "num_results": 5}));
    }

    #[tokio::test]
    async fn test_unknown_tool_payload() {
        let call = ToolCall::with_json("c1", "teleport", json!({}));
        let dispatch = dispatch_tool_call(&tools(), &call).await;
        assert_eq!(dispatch.payload, json!({"error": "Unknown tool: teleport"}));
        assert_eq!(dispatch.failure, Some(DispatchFailure::UnknownTool));
    }

    #[tokio::test]
    async fn test_malformed_arguments_never_invoke_tool() {
        let set = tools();
        let call = ToolCall::new("c1", "echo", "[\"not\", \"an object\"]");
        let dispatch = dispatch_tool_call(&set, &call).await;
        let Some(DispatchFailure::Tool(error)) = &dispatch.failure else {
            panic!("expected tool failure, got {:?}", dispatch.failure);
        };
        assert_eq!(error.category(), ErrorCategory::Validation);
        assert!(dispatch.payload["error"].as_str().unwrap().contains("echo"));
    }

    #[tokio::test]
    async fn test_validation_error_payload() {
        let call = ToolCall::with_json("c1", "echo", json!({"query": "rust", "num_results": 0}));
        let dispatch = dispatch_tool_call(&tools(), &call).await;
        let message = dispatch.payload["error"].as_str().unwrap();
        assert!(message.contains("num_results"));
        assert!(!dispatch.is_success());
    }

    #[tokio::test]
    async fn test_tool_error_payload() {
        let call = ToolCall::with_json("c1", "flaky_search", json!({"query": "rust"}));
        let dispatch = dispatch_tool_call(&tools(), &call).await;
        assert_eq!(dispatch.payload, json!({"error": "Rate limit exceeded"}));
        let Some(DispatchFailure::Tool(error)) = dispatch.failure else {
            panic!("expected tool failure, got {:?}", dispatch.failure);
        };
        assert_eq!(error.category(), ErrorCategory::RateLimited);
    }
}
