use crate::core::steps::AgentStep;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of an agent execution run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Name of the agent that produced the output
    pub agent: String,
    /// Final Markdown output from the agent
    pub output: String,
    /// All steps taken during execution
    pub steps: Vec<AgentStep>,
    /// Tokens used across every turn (if reported by the backend)
    pub tokens: Option<TokenUsage>,
    /// Total execution duration
    pub duration: Duration,
    /// Number of iterations used
    pub iterations: usize,
}

/// Token usage information from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn add(self, other: TokenUsage) -> TokenUsage {
        TokenUsage {
            prompt_tokens: self.prompt_tokens.saturating_add(other.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(other.completion_tokens),
            total_tokens: self.total_tokens.saturating_add(other.total_tokens),
        }
    }
}

impl RunResult {
    /// Generate a human-readable replay of the execution
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("=== {} Execution Trace ===", self.agent));
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Iterations: {}", self.iterations));

        if let Some(tokens) = &self.tokens {
            lines.push(format!(
                "Tokens: {} prompt + {} completion = {} total",
                tokens.prompt_tokens, tokens.completion_tokens, tokens.total_tokens
            ));
        }

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        lines.join("\n")
    }

    /// Get count of tool calls executed
    pub fn action_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, AgentStep::Action { .. }))
            .count()
    }

    /// Get all error observations
    pub fn errors(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                AgentStep::Observation {
                    result, is_error, ..
                } if *is_error => Some(result.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with(steps: Vec<AgentStep>, tokens: Option<TokenUsage>) -> RunResult {
        RunResult {
            agent: "Travel Logistics Agent".to_string(),
            output: "Take the RER B".to_string(),
            steps,
            tokens,
            duration: Duration::from_secs(2),
            iterations: 2,
        }
    }

    #[test]
    fn test_replay_format() {
        let result = result_with(
            vec![
                AgentStep::Task {
                    content: "Transportation plan".to_string(),
                },
                AgentStep::FinalAnswer {
                    answer: "Take the RER B".to_string(),
                },
            ],
            Some(TokenUsage {
                prompt_tokens: 100,
                completion_tokens: 50,
                total_tokens: 150,
            }),
        );

        let replay = result.replay();
        assert!(replay.contains("Travel Logistics Agent Execution Trace"));
        assert!(replay.contains("150 total"));
        assert!(replay.contains("Task"));
        assert!(replay.contains("Final Answer"));
    }

    #[test]
    fn test_action_and_error_tracking() {
        let result = result_with(
            vec![
                AgentStep::Action {
                    tool_name: "web_search".to_string(),
                    tool_call_id: "1".to_string(),
                    arguments: json!({}),
                },
                AgentStep::Observation {
                    tool_call_id: "1".to_string(),
                    result: "Error occurred".to_string(),
                    is_error: true,
                },
                AgentStep::Observation {
                    tool_call_id: "2".to_string(),
                    result: "Success".to_string(),
                    is_error: false,
                },
            ],
            None,
        );

        assert_eq!(result.action_count(), 1);
        assert_eq!(result.errors(), vec!["Error occurred"]);
    }

    #[test]
    fn test_token_usage_sum() {
        let a = TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        };
        let b = TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        };
        assert_eq!(a.add(b).total_tokens, 18);
    }

    #[test]
    fn test_token_usage_saturates() {
        let near_max = TokenUsage {
            prompt_tokens: u32::MAX - 1,
            completion_tokens: 1,
            total_tokens: u32::MAX,
        };
        let more = TokenUsage {
            prompt_tokens: 5,
            completion_tokens: 5,
            total_tokens: 10,
        };
        let sum = near_max.add(more);
        assert_eq!(sum.prompt_tokens, u32::MAX);
        assert_eq!(sum.completion_tokens, 6);
        assert_eq!(sum.total_tokens, u32::MAX);
    }
}
