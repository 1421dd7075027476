use crate::error::AgentError;
use serde_json::{json, Value};
use std::{collections::BTreeMap, future::Future, pin::Pin};

/// Boxed future returned by [`Tool::execute`]
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, AgentError>> + Send + 'a>>;

/// A capability the model may call during an agent run
pub trait Tool: Send + Sync + std::fmt::Debug {
    /// Function name the model uses to call the tool
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema the call arguments are validated against
    fn parameters_schema(&self) -> Value;

    /// Run with already validated arguments. Errors other than
    /// `Validation` end the agent run.
    fn execute(&self, parameters: Value) -> ToolFuture<'_>;
}

/// Tools by name, kept sorted so requests list them in a stable order
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().copied().collect()
    }

    /// `tools` array for a chat-completions request
    pub fn to_openai_tools(&self) -> Vec<Value> {
        self.tools
            .values()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema()
                    }
                })
            })
            .collect()
    }
}
