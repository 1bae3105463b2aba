//! Run Agent use case
//!
//! Drives the multi-turn tool-calling loop:
//!
//! ```text
//! seed [system, user]
//!   └─▶ turn: send conversation + tool schemas ──▶ assistant message
//!         ├─ no tool calls ──────────────────────▶ Done (answer = text)
//!         └─ tool calls ─▶ dispatch each ─▶ append tool messages ─▶ next turn
//! turn budget exhausted ─────────────────────────▶ Aborted (sentinel text)
//! ```
//!
//! A failing tool never aborts the run: its error is returned to the model as
//! a `{"error": ...}` tool message. Only model endpoint failures end the run
//! with an error.

mod dispatch;
#[cfg(test)]
pub(crate) mod test_support;
mod types;

pub use dispatch::{DispatchFailure, ToolDispatch, dispatch_tool_call};
pub use types::{RunAgentError, RunAgentInput, RunAgentOutput};

use crate::ports::agent_progress::{AgentProgressNotifier, NoAgentProgress};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ChatRequest, LlmGateway};
use crate::use_cases::tool_helpers::{tool_args_preview, truncate_preview};
use serde_json::json;
use std::sync::Arc;
use toolkit_domain::{
    AgentOutcome, Conversation, LoopState, Message, TokenUsage, ToolCall, ToolSet,
};
use tracing::{debug, info, warn};

/// Use case for running one agent conversation to completion.
#[derive(Clone)]
pub struct RunAgentUseCase {
    gateway: Arc<dyn LlmGateway>,
    tools: Arc<ToolSet>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunAgentUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, tools: Arc<ToolSet>) -> Self {
        Self {
            gateway,
            tools,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Execute without progress reporting.
    pub async fn execute(&self, input: RunAgentInput) -> Result<RunAgentOutput, RunAgentError> {
        self.execute_with_progress(input, &NoAgentProgress).await
    }

    /// Execute the loop with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        input: RunAgentInput,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<RunAgentOutput, RunAgentError> {
        let params = &input.execution;
        let mut state = LoopState::new(params.max_turns)
            .map_err(|e| RunAgentError::InvalidConfig(e.to_string()))?;
        let mut conversation = Conversation::seeded(&input.system_prompt, &input.task);
        let protocol = self.gateway.protocol();
        let schemas = self.tools.call_schemas(protocol);
        let mut usage = TokenUsage::default();

        info!(
            "Starting agent run: model={}, tools=[{}], max_turns={}",
            input.model,
            self.tools.names().collect::<Vec<_>>().join(", "),
            params.max_turns
        );
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEvent::AGENT_START,
            json!({
                "model": input.model,
                "task": input.task,
                "tools": self.tools.names().collect::<Vec<_>>(),
                "max_turns": params.max_turns,
                "protocol": protocol.as_str(),
            }),
        ));
        progress.on_run_start(&input.model, params.max_turns);
        progress.on_phase_change(&state.phase());

        let mut answer = None;
        while state.can_continue() {
            let turn = state.begin_turn()?;
            progress.on_turn_start(turn, params.max_turns);

            let request = ChatRequest {
                model: &input.model,
                messages: conversation.messages(),
                tools: &schemas,
            };
            let response = self.gateway.complete(request).await.inspect_err(|e| {
                warn!("Model request failed on turn {}: {}", turn, e);
                self.conversation_logger.log(ConversationEvent::new(
                    ConversationEvent::AGENT_FINISH,
                    json!({ "status": "error", "turns": turn, "error": e.to_string() }),
                ));
            })?;

            if let Some(turn_usage) = response.usage {
                usage.prompt_tokens += turn_usage.prompt_tokens;
                usage.completion_tokens += turn_usage.completion_tokens;
                usage.total_tokens += turn_usage.total_tokens;
            }

            debug!(
                "Turn {}/{}: model returned {} tool call(s), {} bytes of text",
                turn,
                params.max_turns,
                response.tool_calls.len(),
                response.content.as_deref().map_or(0, str::len)
            );
            self.conversation_logger.log(ConversationEvent::new(
                ConversationEvent::MODEL_RESPONSE,
                json!({
                    "turn": turn,
                    "model": response.model,
                    "text": response.content,
                    "tool_calls": response.tool_calls,
                    "stop_reason": response.stop_reason,
                }),
            ));
            progress.on_model_response(turn, response.tool_calls.len());

            let tool_calls = response.tool_calls.clone();
            let text = response.text_content();
            conversation.append(response.into_message())?;

            if tool_calls.is_empty() {
                state.finish()?;
                progress.on_phase_change(&state.phase());
                answer = Some(text);
                break;
            }

            state.await_tool_results()?;
            progress.on_phase_change(&state.phase());

            let dispatches = self
                .dispatch_turn(&tool_calls, params.parallel_tool_calls, progress)
                .await;
            for dispatch in dispatches {
                conversation.append(Message::tool_result(
                    dispatch.call_id,
                    dispatch.tool_name,
                    dispatch.payload.to_string(),
                ))?;
            }

            state.tool_results_delivered()?;
            progress.on_phase_change(&state.phase());
        }

        let outcome = match answer {
            Some(answer) => AgentOutcome::Completed { answer },
            None => {
                let reason = state.abort()?;
                progress.on_phase_change(&state.phase());
                warn!(
                    "Agent stopped after {} turns without a final answer",
                    state.turn_count()
                );
                AgentOutcome::Incomplete {
                    message: params.incomplete_message.clone(),
                    reason,
                }
            }
        };

        info!(
            "Agent run finished after {} turn(s): {}",
            state.turn_count(),
            if outcome.is_completed() { "completed" } else { "incomplete" }
        );
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEvent::AGENT_FINISH,
            json!({
                "status": state.phase().as_str(),
                "turns": state.turn_count(),
                "outcome": outcome,
                "usage": usage,
            }),
        ));
        progress.on_run_complete(&outcome, state.turn_count());

        Ok(RunAgentOutput {
            outcome,
            turns: state.turn_count(),
            conversation,
            usage,
        })
    }

    /// Dispatch every call of one turn; results come back in emission order.
    async fn dispatch_turn(
        &self,
        calls: &[ToolCall],
        parallel: bool,
        progress: &dyn AgentProgressNotifier,
    ) -> Vec<ToolDispatch> {
        let dispatches = if parallel {
            for call in calls {
                self.before_dispatch(call, progress);
            }
            let futures = calls
                .iter()
                .map(|call| dispatch_tool_call(&self.tools, call));
            futures::future::join_all(futures).await
        } else {
            let mut dispatches = Vec::with_capacity(calls.len());
            for call in calls {
                self.before_dispatch(call, progress);
                dispatches.push(dispatch_tool_call(&self.tools, call).await);
            }
            dispatches
        };

        for dispatch in &dispatches {
            self.after_dispatch(dispatch, progress);
        }
        dispatches
    }

    fn before_dispatch(&self, call: &ToolCall, progress: &dyn AgentProgressNotifier) {
        let preview = tool_args_preview(call);
        debug!("Dispatching tool call {} -> {}({})", call.id, call.name, preview);
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEvent::TOOL_CALL,
            json!({
                "call_id": call.id,
                "tool": call.name,
                "arguments": call.arguments,
            }),
        ));
        progress.on_tool_call(&call.name, &preview);
    }

    fn after_dispatch(&self, dispatch: &ToolDispatch, progress: &dyn AgentProgressNotifier) {
        match &dispatch.failure {
            None => {
                debug!(
                    "Tool {} ({}) succeeded in {}ms",
                    dispatch.tool_name, dispatch.call_id, dispatch.duration_ms
                );
                progress.on_tool_result(&dispatch.tool_name, dispatch.duration_ms);
            }
            Some(DispatchFailure::UnknownTool) => {
                warn!("Model requested unknown tool '{}'", dispatch.tool_name);
                let available: Vec<&str> = self.tools.names().collect();
                progress.on_tool_not_found(&dispatch.tool_name, &available);
            }
            Some(DispatchFailure::Tool(error)) => {
                warn!(
                    "Tool {} failed ({}): {}",
                    dispatch.tool_name,
                    error.category(),
                    error.message()
                );
                progress.on_tool_error(&dispatch.tool_name, error.category(), error.message());
            }
        }

        let content = dispatch.payload.to_string();
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEvent::TOOL_RESULT,
            json!({
                "call_id": dispatch.call_id,
                "tool": dispatch.tool_name,
                "success": dispatch.is_success(),
                "duration_ms": dispatch.duration_ms,
                "bytes": content.len(),
                "preview": truncate_preview(&content, 200),
            }),
        ));
    }
}
