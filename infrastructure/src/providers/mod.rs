//! Model endpoint adapters implementing the [`LlmGateway`](toolkit_application::LlmGateway) port.

pub mod openai;

pub use openai::{DEFAULT_COMPLETION_TIMEOUT, OpenAiCompatibleGateway};
