use crate::{
    core::profile::AgentProfile,
    error::Result,
    services::openai_client::ChatBackend,
    tools::FunctionFactory,
};
use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";

/// Anything the planning session can hand a query to
#[async_trait]
pub trait AgentRunner: Send + Sync {
    fn name(&self) -> &str;

    /// Run one query to completion and return the Markdown answer
    async fn run(&self, query: &str) -> Result<String>;
}

/// A role-configured agent backed by a chat-completions endpoint
#[derive(Debug)]
pub struct Agent {
    profile: AgentProfile,
    backend: Arc<dyn ChatBackend>,
    function_factory: FunctionFactory,
    model: String,
    max_iterations: usize,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl Agent {
    pub fn new(profile: AgentProfile, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            profile,
            backend,
            function_factory: FunctionFactory::new(),
            model: DEFAULT_MODEL.to_string(),
            max_iterations: 10,
            max_tokens: Some(4096),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_tools(mut self, function_factory: FunctionFactory) -> Self {
        self.function_factory = function_factory;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    pub(crate) fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub(crate) fn function_factory(&self) -> &FunctionFactory {
        &self.function_factory
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn system_prompt(&self) -> String {
        self.profile
            .system_prompt(Local::now(), !self.function_factory.is_empty())
    }

    pub(crate) async fn make_raw_request(&self, request_body: &Value) -> Result<Value> {
        self.backend
            .chat_completion(request_body, self.timeout)
            .await
    }

    /// Run a query and return only the answer text
    pub async fn run(&self, query: &str) -> Result<String> {
        let result = self.run_with_steps(query).await?;
        debug!(target: "travel_planner::trace", "{}", result.replay());
        Ok(result.output)
    }
}

#[async_trait]
impl AgentRunner for Agent {
    fn name(&self) -> &str {
        self.profile.name()
    }

    async fn run(&self, query: &str) -> Result<String> {
        Agent::run(self, query).await
    }
}
