use super::steps::AgentStep;
use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Represents a tool call request from the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool to execute
    pub name: String,
    /// Arguments exactly as the model sent them
    pub raw_arguments: String,
}

impl ToolCall {
    /// Parse a tool call from OpenAI response format. Returns `None` when the
    /// call has no function or an empty function name.
    pub fn from_openai_format(tool_call: &Value) -> Option<Self> {
        let id = tool_call
            .get("id")
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string();
        let function = tool_call.get("function")?;
        let name = function
            .get("name")
            .and_then(|value| value.as_str())
            .filter(|name| !name.is_empty())?
            .to_string();
        let raw_arguments = match function.get("arguments") {
            Some(Value::String(raw)) => raw.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Some(Self {
            id,
            name,
            raw_arguments,
        })
    }

    /// Decode the JSON arguments. Empty arguments decode to an empty object.
    pub fn parse_arguments(&self) -> Result<Value> {
        if self.raw_arguments.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&self.raw_arguments).map_err(|err| {
            AgentError::InvalidFunctionCall(format!(
                "Failed to parse arguments for tool '{}': {}",
                self.name, err
            ))
        })
    }

    /// Step recorded before the call runs
    pub fn to_action(&self) -> AgentStep {
        AgentStep::Action {
            tool_name: self.name.clone(),
            tool_call_id: self.id.clone(),
            arguments: self
                .parse_arguments()
                .unwrap_or_else(|_| Value::String(self.raw_arguments.clone())),
        }
    }
}

/// Represents the output from a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub tool_name: String,
    /// Content sent back to the model
    pub content: String,
    pub is_error: bool,
    pub duration_ms: u128,
}

impl ToolOutput {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }

    pub fn into_observation(self) -> AgentStep {
        AgentStep::Observation {
            tool_call_id: self.tool_call_id,
            result: self.content,
            is_error: self.is_error,
        }
    }
}

/// Tracks the execution of a tool call with timing information
#[derive(Debug)]
pub struct ToolExecution {
    pub tool_call: ToolCall,
    start_time: Instant,
}

impl ToolExecution {
    pub fn start(tool_call: ToolCall) -> Self {
        Self {
            tool_call,
            start_time: Instant::now(),
        }
    }

    pub fn complete(self, output: Value) -> ToolOutput {
        let content = match output {
            Value::String(s) => s,
            other => other.to_string(),
        };
        self.finish(content, false)
    }

    /// Complete with an error the model should see
    pub fn complete_with_error(self, error: &AgentError) -> ToolOutput {
        self.finish(error.to_error_payload().to_string(), true)
    }

    fn finish(self, content: String, is_error: bool) -> ToolOutput {
        ToolOutput {
            tool_call_id: self.tool_call.id,
            tool_name: self.tool_call.name,
            content,
            is_error,
            duration_ms: self.start_time.elapsed().as_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_call_from_openai() {
        let openai_format = json!({
            "id": "call_456",
            "type": "function",
            "function": {
                "name": "web_search",
                "arguments": "{\"query\": \"Paris museums\"}"
            }
        });

        let call = ToolCall::from_openai_format(&openai_format).unwrap();
        assert_eq!(call.id, "call_456");
        assert_eq!(call.name, "web_search");
        assert_eq!(call.parse_arguments().unwrap()["query"], "Paris museums");
    }

    #[test]
    fn test_missing_function_name() {
        let call = json!({ "id": "call_1", "function": { "name": "" } });
        assert!(ToolCall::from_openai_format(&call).is_none());
        assert!(ToolCall::from_openai_format(&json!({ "id": "call_2" })).is_none());
    }

    #[test]
    fn test_bad_arguments() {
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "web_search".to_string(),
            raw_arguments: "{oops".to_string(),
        };
        let err = call.parse_arguments().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FUNCTION_CALL");
        assert!(matches!(
            call.to_action(),
            AgentStep::Action { arguments: Value::String(_), .. }
        ));
    }

    #[test]
    fn test_tool_execution_error_output() {
        let call = ToolCall {
            id: "call_9".to_string(),
            name: "web_search".to_string(),
            raw_arguments: String::new(),
        };
        let output = ToolExecution::start(call)
            .complete_with_error(&AgentError::ToolNotFound("web_search".to_string()));
        assert!(output.is_error);
        assert!(output.content.contains("TOOL_NOT_FOUND"));
        assert!(matches!(
            output.into_observation(),
            AgentStep::Observation { is_error: true, .. }
        ));
    }
}
