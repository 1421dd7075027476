use crate::{
    core::{
        agent::Agent,
        memory::AgentMemory,
        steps::AgentStep,
        tool_call::{ToolCall, ToolExecution},
    },
    error::{AgentError, Result},
    services::openai_client::ChatCompletionRequest,
    types::result::{RunResult, TokenUsage},
};
use serde_json::{json, Value};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, warn};

const EMPTY_ANSWER_REMINDER: &str =
    "Reminder: your last reply was empty. Answer the user's request in full, using markdown.";

impl Agent {
    /// Run the chat/tool loop until the model answers in plain text.
    ///
    /// Malformed tool calls are fed back to the model as error observations.
    /// A fault inside a tool (search provider down, bad response) ends the
    /// run with that error.
    pub async fn run_with_steps(&self, prompt: &str) -> Result<RunResult> {
        let start_time = Instant::now();
        let agent_name = self.profile().name();
        let mut memory = AgentMemory::new(agent_name, Some(self.system_prompt()));
        let mut tokens: Option<TokenUsage> = None;

        memory.add_step(AgentStep::Task {
            content: prompt.to_string(),
        });

        let mut iteration = 0;

        while iteration < self.max_iterations() {
            iteration += 1;

            let tools = self.function_factory().get_openai_tools();
            let mut chat_request = ChatCompletionRequest::new(self.model(), memory.as_messages())
                .with_max_tokens(self.max_tokens());

            if !tools.is_empty() {
                chat_request = chat_request
                    .with_tools(tools)
                    .with_tool_choice(json!("auto"));
            }

            let request_body = chat_request.into_value();
            debug!(agent = agent_name, iteration, "sending chat completion");

            let response = timeout(self.timeout(), self.make_raw_request(&request_body))
                .await
                .map_err(|_| {
                    AgentError::Timeout(format!("{} backend call timed out", agent_name))
                })??;

            let assistant_message = first_message(&response)?;

            if let Some(usage) = parse_usage(&response) {
                tokens = Some(tokens.unwrap_or_default().add(usage));
            }

            let tool_calls = assistant_message
                .get("tool_calls")
                .and_then(|value| value.as_array())
                .filter(|calls| !calls.is_empty());

            match tool_calls {
                Some(calls) => {
                    for raw_call in calls {
                        let Some(tool_call) = ToolCall::from_openai_format(raw_call) else {
                            let tool_call_id = raw_call
                                .get("id")
                                .and_then(|value| value.as_str())
                                .unwrap_or_default();
                            warn!(agent = agent_name, "dropping tool call without a function name");
                            memory.add_step(AgentStep::Action {
                                tool_name: "unknown".to_string(),
                                tool_call_id: tool_call_id.to_string(),
                                arguments: Value::Null,
                            });
                            memory.add_step(AgentStep::Observation {
                                tool_call_id: tool_call_id.to_string(),
                                result: AgentError::InvalidFunctionCall(
                                    "Tool call missing function name".to_string(),
                                )
                                .to_error_payload()
                                .to_string(),
                                is_error: true,
                            });
                            continue;
                        };

                        memory.add_step(tool_call.to_action());

                        let arguments = tool_call.parse_arguments();
                        let execution = ToolExecution::start(tool_call);
                        let outcome = match arguments {
                            Ok(arguments) => {
                                self.function_factory()
                                    .execute_function(&execution.tool_call.name, arguments)
                                    .await
                            }
                            Err(err) => Err(err),
                        };

                        let output = match outcome {
                            Ok(value) => execution.complete(value),
                            Err(err) if err.is_model_recoverable() => {
                                execution.complete_with_error(&err)
                            }
                            Err(err) => {
                                warn!(
                                    agent = agent_name,
                                    tool = %execution.tool_call.name,
                                    error = %err,
                                    "tool failed, aborting run"
                                );
                                return Err(err);
                            }
                        };

                        debug!(
                            agent = agent_name,
                            tool = %output.tool_name,
                            elapsed_ms = output.duration_ms as u64,
                            is_error = output.is_error,
                            "tool call finished"
                        );
                        memory.add_step(output.into_observation());
                    }
                }
                None => {
                    let answer = assistant_message
                        .get("content")
                        .and_then(|value| value.as_str())
                        .unwrap_or("")
                        .trim()
                        .to_string();

                    if answer.is_empty() {
                        memory.add_step(AgentStep::Reminder {
                            content: EMPTY_ANSWER_REMINDER.to_string(),
                        });
                        continue;
                    }

                    memory.add_step(AgentStep::FinalAnswer {
                        answer: answer.clone(),
                    });

                    return Ok(RunResult {
                        agent: agent_name.to_string(),
                        output: answer,
                        steps: memory.into_steps(),
                        tokens,
                        duration: start_time.elapsed(),
                        iterations: iteration,
                    });
                }
            }
        }

        Err(AgentError::MaxIterations(self.max_iterations()))
    }
}

fn first_message(response: &Value) -> Result<&Value> {
    let choices = response
        .get("choices")
        .and_then(|value| value.as_array())
        .ok_or_else(|| {
            AgentError::Backend("Missing 'choices' array in completion response".to_string())
        })?;

    let first_choice = choices.first().ok_or_else(|| {
        AgentError::Backend("Completion response contained no choices".to_string())
    })?;

    first_choice.get("message").ok_or_else(|| {
        AgentError::Backend("Completion response missing assistant message".to_string())
    })
}

fn parse_usage(response: &Value) -> Option<TokenUsage> {
    let usage = response.get("usage")?;
    Some(TokenUsage {
        prompt_tokens: u32::try_from(usage.get("prompt_tokens")?.as_u64()?).ok()?,
        completion_tokens: u32::try_from(usage.get("completion_tokens")?.as_u64()?).ok()?,
        total_tokens: u32::try_from(usage.get("total_tokens")?.as_u64()?).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_errors() {
        let err = first_message(&json!({})).unwrap_err();
        assert!(err.to_string().contains("choices"));

        let err = first_message(&json!({ "choices": [] })).unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_parse_usage() {
        let response = json!({
            "usage": { "prompt_tokens": 12, "completion_tokens": 30, "total_tokens": 42 }
        });
        assert_eq!(parse_usage(&response).map(|u| u.total_tokens), Some(42));
        assert!(parse_usage(&json!({})).is_none());
    }

    #[test]
    fn test_parse_usage_rejects_oversized_counts() {
        let response = json!({
            "usage": {
                "prompt_tokens": 12,
                "completion_tokens": u64::from(u32::MAX) + 1,
                "total_tokens": 42
            }
        });
        assert!(parse_usage(&response).is_none());
    }
}
