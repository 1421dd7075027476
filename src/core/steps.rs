use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a single step in an agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentStep {
    /// Query handed to the agent
    Task { content: String },
    /// Action step where the model calls a tool
    Action {
        tool_name: String,
        tool_call_id: String,
        arguments: Value,
    },
    /// Observation step capturing the result of a tool execution
    Observation {
        tool_call_id: String,
        result: String,
        is_error: bool,
    },
    /// Nudge sent back when the model answered with nothing
    Reminder { content: String },
    /// Final answer from the agent
    FinalAnswer { answer: String },
}

impl AgentStep {
    /// Convert step to OpenAI message format
    pub fn to_message(&self) -> Value {
        match self {
            AgentStep::Task { content } => {
                serde_json::json!({
                    "role": "user",
                    "content": content
                })
            }
            AgentStep::Action {
                tool_name,
                tool_call_id,
                arguments,
            } => {
                let arguments = match arguments {
                    Value::String(raw) => raw.clone(),
                    other => serde_json::to_string(other).unwrap_or_default(),
                };
                serde_json::json!({
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": tool_call_id,
                        "type": "function",
                        "function": {
                            "name": tool_name,
                            "arguments": arguments
                        }
                    }]
                })
            }
            AgentStep::Observation {
                tool_call_id,
                result,
                ..
            } => {
                serde_json::json!({
                    "role": "tool",
                    "tool_call_id": tool_call_id,
                    "content": result
                })
            }
            AgentStep::Reminder { content } => {
                serde_json::json!({
                    "role": "system",
                    "content": content
                })
            }
            AgentStep::FinalAnswer { answer } => {
                serde_json::json!({
                    "role": "assistant",
                    "content": answer
                })
            }
        }
    }

    /// Get a human-readable description of the step
    pub fn describe(&self) -> String {
        match self {
            AgentStep::Task { content } => format!("🧭 Task: {}", preview(content)),
            AgentStep::Action {
                tool_name,
                arguments,
                ..
            } => {
                format!("🔧 Action: {}({})", tool_name, arguments)
            }
            AgentStep::Observation {
                result, is_error, ..
            } => {
                if *is_error {
                    format!("❌ Error: {}", preview(result))
                } else {
                    format!("👁 Observation: {}", preview(result))
                }
            }
            AgentStep::Reminder { content } => format!("↩ Reminder: {}", content),
            AgentStep::FinalAnswer { answer } => format!("✅ Final Answer: {}", preview(answer)),
        }
    }
}

// Itineraries run to pages; keep log lines readable.
fn preview(text: &str) -> String {
    const LIMIT: usize = 160;
    let single_line = text.replace('\n', " ");
    match single_line.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}…", &single_line[..idx]),
        None => single_line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_with_unparsed_arguments_keeps_raw_string() {
        let step = AgentStep::Action {
            tool_name: "web_search".to_string(),
            tool_call_id: "call_1".to_string(),
            arguments: Value::String("{not json".to_string()),
        };
        let message = step.to_message();
        assert_eq!(
            message["tool_calls"][0]["function"]["arguments"],
            "{not json"
        );
    }

    #[test]
    fn test_action_serializes_object_arguments() {
        let step = AgentStep::Action {
            tool_name: "web_search".to_string(),
            tool_call_id: "call_1".to_string(),
            arguments: json!({"query": "Paris"}),
        };
        let message = step.to_message();
        assert_eq!(message["role"], "assistant");
        assert_eq!(
            message["tool_calls"][0]["function"]["arguments"],
            "{\"query\":\"Paris\"}"
        );
    }

    #[test]
    fn test_describe_truncates_long_answers() {
        let step = AgentStep::FinalAnswer {
            answer: "day ".repeat(200),
        };
        assert!(step.describe().ends_with('…'));
    }
}
