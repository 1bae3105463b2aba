//! OpenAI-compatible chat-completion gateway.
//!
//! Works with OpenRouter, OpenAI and any other service implementing the
//! `/chat/completions` API with function calling.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use toolkit_application::{ChatRequest, GatewayError, LlmGateway};
use toolkit_domain::{LlmResponse, Message, SchemaProtocol, StopReason, TokenUsage, ToolCall};
use tracing::debug;

/// Default request timeout for one completion
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(120);

/// Gateway for any OpenAI-compatible chat-completion endpoint.
pub struct OpenAiCompatibleGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl OpenAiCompatibleGateway {
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://openrouter.ai/api/v1").
    /// * `api_key` - Optional bearer token.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout: DEFAULT_COMPLETION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    /// `/chat/completions` only accepts `{"type": "function", ...}` tools.
    fn protocol(&self) -> SchemaProtocol {
        SchemaProtocol::FunctionCalling
    }

    async fn complete(&self, request: ChatRequest<'_>) -> Result<LlmResponse, GatewayError> {
        let body = build_request(&request);

        debug!(
            model = %request.model,
            message_count = request.messages.len(),
            tool_count = request.tools.len(),
            "Sending completion request"
        );

        let mut builder = self
            .client
            .post(self.completions_url())
            .json(&body)
            .timeout(self.timeout);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, body));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            GatewayError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })?;

        let result = into_llm_response(parsed)?;
        debug!(
            stop_reason = ?result.stop_reason,
            tool_calls = result.tool_calls.len(),
            "Received completion response"
        );
        Ok(result)
    }
}

/// Map a non-success HTTP status to a gateway error.
pub fn error_for_status(status: StatusCode, body: String) -> GatewayError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GatewayError::RateLimited(body);
    }
    GatewayError::Api {
        status: status.as_u16(),
        message: body,
    }
}

fn build_request<'a>(request: &ChatRequest<'a>) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: request.model,
        messages: request.messages.iter().map(WireMessage::from).collect(),
        tools: request.tools,
    }
}

fn into_llm_response(response: ChatCompletionResponse) -> Result<LlmResponse, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("No choices in response".to_string()))?;

    let tool_calls: Vec<ToolCall> = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall::new(tc.id, tc.function.name, tc.function.arguments))
        .collect();

    let stop_reason = match choice.finish_reason.as_deref() {
        Some(reason) => Some(StopReason::from_finish_reason(reason)),
        None if !tool_calls.is_empty() => Some(StopReason::ToolUse),
        None => None,
    };

    Ok(LlmResponse {
        content: choice.message.content.filter(|c| !c.is_empty()),
        tool_calls,
        stop_reason,
        model: response.model,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [Value],
}

fn no_tools(tools: &&[Value]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    // Assistant messages carrying only tool calls send `content: null`
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a Message> for WireMessage<'a> {
    fn from(msg: &'a Message) -> Self {
        WireMessage {
            role: msg.role.as_str(),
            content: msg.content.as_deref(),
            tool_calls: msg
                .tool_calls
                .iter()
                .map(|tc| WireToolCall {
                    id: &tc.id,
                    kind: "function",
                    function: WireFunctionCall {
                        name: &tc.name,
                        arguments: &tc.arguments,
                    },
                })
                .collect(),
            tool_call_id: msg.tool_call_id.as_deref(),
            name: msg.name.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireToolCall<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionCall<'a>,
}

#[derive(Debug, Serialize)]
struct WireFunctionCall<'a> {
    name: &'a str,
    arguments: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ResponseToolCall {
    id: String,
    function: ResponseFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ResponseFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
