//! Scripted gateway and counting tools shared by the agent loop tests.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use toolkit_domain::tool::schema::{FieldSpec, FieldType, InputSchema, OutputSchema, ParamSpec, ParamType};
use toolkit_domain::{LlmResponse, Message, SchemaProtocol, Tool, ToolCall, ToolError};

/// What the gateway saw on one round-trip
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub tools: Vec<Value>,
}

/// Replays a fixed list of responses, recording every request.
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<LlmResponse, GatewayError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    protocol: SchemaProtocol,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub fn with_results(results: Vec<Result<LlmResponse, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(results)),
            requests: Mutex::new(Vec::new()),
            protocol: SchemaProtocol::FunctionCalling,
        }
    }

    pub fn with_protocol(mut self, protocol: SchemaProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn protocol(&self) -> SchemaProtocol {
        self.protocol
    }

    async fn complete(&self, request: ChatRequest<'_>) -> Result<LlmResponse, GatewayError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            messages: request.messages.to_vec(),
            tools: request.tools.to_vec(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::InvalidResponse("No more responses".to_string())))
    }
}

/// Requests one `echo` call on every turn, never answering.
pub struct AlwaysToolCallGateway {
    calls: AtomicUsize,
}

impl AlwaysToolCallGateway {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmGateway for AlwaysToolCallGateway {
    async fn complete(&self, _request: ChatRequest<'_>) -> Result<LlmResponse, GatewayError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(LlmResponse::from_tool_calls(vec![ToolCall::new(
            format!("call_{}", n),
            "echo",
            r#"{"query": "again"}"#,
        )]))
    }
}

#[derive(Debug, Deserialize)]
pub struct EchoInput {
    pub query: String,
    pub num_results: u32,
}

#[derive(Debug, Serialize)]
pub struct EchoOutput {
    pub query: String,
    pub num_results: u32,
}

fn search_like_schema() -> InputSchema {
    InputSchema::new()
        .with_param(ParamSpec::new("query", "The search query", ParamType::String).required())
        .with_param(
            ParamSpec::new("num_results", "Number of results (1-10)", ParamType::Integer)
                .with_default(5)
                .with_range(1.0, 10.0),
        )
}

/// Echoes its validated input back; counts executions.
pub struct EchoTool {
    pub executions: AtomicUsize,
}

impl EchoTool {
    pub fn new() -> Self {
        Self {
            executions: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Tool for EchoTool {
    type Input = EchoInput;
    type Output = EchoOutput;

    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo the query back"
    }

    fn input_schema(&self) -> InputSchema {
        search_like_schema()
    }

    fn output_schema(&self) -> OutputSchema {
        OutputSchema::new()
            .with_field(FieldSpec::new("query", "Query", FieldType::String))
            .with_field(FieldSpec::new("num_results", "Count", FieldType::Integer))
    }

    async fn execute(&self, input: EchoInput) -> Result<EchoOutput, ToolError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Ok(EchoOutput {
            query: input.query,
            num_results: input.num_results,
        })
    }
}

/// Always fails with a fixed error; counts executions.
pub struct FailingTool {
    error: ToolError,
    pub executions: AtomicUsize,
}

impl FailingTool {
    pub fn rate_limited() -> Self {
        Self {
            error: ToolError::rate_limited("Rate limit exceeded").with_status(429),
            executions: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Tool for FailingTool {
    type Input = EchoInput;
    type Output = EchoOutput;

    fn name(&self) -> &str {
        "flaky_search"
    }

    fn description(&self) -> &str {
        "Always rate limited"
    }

    fn input_schema(&self) -> InputSchema {
        search_like_schema()
    }

    fn output_schema(&self) -> OutputSchema {
        OutputSchema::new()
    }

    async fn execute(&self, _input: EchoInput) -> Result<EchoOutput, ToolError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}
