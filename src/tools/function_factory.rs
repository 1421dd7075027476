use super::{tool::ToolRegistry, Tool};
use crate::{AgentError, Result};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Factory for creating and managing function/tool execution
#[derive(Debug)]
pub struct FunctionFactory {
    registry: ToolRegistry,
}

impl FunctionFactory {
    /// Create a new function factory
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
        }
    }

    /// Register a tool with the factory
    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.registry.register(tool);
    }

    /// Execute a function call by name after checking the arguments against
    /// the tool's declared parameter schema
    pub async fn execute_function(&self, function_name: &str, parameters: Value) -> Result<Value> {
        let tool = self
            .registry
            .get(function_name)
            .ok_or_else(|| AgentError::ToolNotFound(function_name.to_string()))?;

        validate_arguments(function_name, &tool.parameters_schema(), &parameters)?;

        tool.execute(parameters).await
    }

    /// Get all available tools for OpenAI function calling
    pub fn get_openai_tools(&self) -> Vec<Value> {
        self.registry.to_openai_tools()
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.registry.names()
    }
}

impl Default for FunctionFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_arguments(tool_name: &str, schema: &Value, arguments: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|err| {
            AgentError::Config(format!(
                "Tool `{}` declares an invalid parameter schema: {}",
                tool_name, err
            ))
        })?;

    if let Err(errors) = validator.validate(arguments) {
        let mut details = Vec::new();
        for error in errors.take(MAX_SCHEMA_ERRORS) {
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{}: {}", path, error));
        }

        return Err(AgentError::Validation(format!(
            "Arguments for `{}` do not match its schema: {}",
            tool_name,
            details.join("; ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tool::ToolFuture;
    use serde_json::json;

    #[derive(Debug)]
    struct EchoTool;

    impl Tool for EchoTool {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo the text back"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            })
        }

        fn execute(&self, parameters: Value) -> ToolFuture<'_> {
            Box::pin(async move { Ok(json!({ "echo": parameters["text"] })) })
        }
    }

    #[tokio::test]
    async fn test_execute_registered_tool() {
        let mut factory = FunctionFactory::new();
        factory.register_tool(EchoTool);

        let result = factory
            .execute_function("echo", json!({ "text": "bonjour" }))
            .await
            .unwrap();
        assert_eq!(result["echo"], "bonjour");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let factory = FunctionFactory::new();
        let err = factory
            .execute_function("missing", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_validation_error() {
        let mut factory = FunctionFactory::new();
        factory.register_tool(EchoTool);

        let err = factory
            .execute_function("echo", json!({ "text": 42 }))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.is_model_recoverable());
    }

    #[test]
    fn test_openai_tool_definitions() {
        let mut factory = FunctionFactory::new();
        assert!(factory.is_empty());
        factory.register_tool(EchoTool);

        let tools = factory.get_openai_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["function"]["name"], "echo");
        assert_eq!(factory.tool_names(), vec!["echo"]);
    }
}
