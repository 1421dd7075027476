pub mod execution;
pub mod openai_client;

pub use openai_client::{ChatBackend, ChatCompletionRequest, OpenAIClient};
