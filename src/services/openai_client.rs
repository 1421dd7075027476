use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::warn;

use crate::error::{AgentError, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MAX_RETRIES: usize = 3;

/// A chat-completions endpoint an agent sends its turns to.
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug {
    /// Send one request body and return the raw completion JSON. `timeout`
    /// bounds the whole call, retries and their waits included.
    async fn chat_completion(&self, body: &Value, timeout: Duration) -> Result<Value>;
}

/// OpenAI-compatible HTTP backend (OpenRouter, OpenAI, a local Ollama server...)
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: Option<String>,
    base_url: String,
    max_retries: usize,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatBackend for OpenAIClient {
    async fn chat_completion(&self, body: &Value, timeout: Duration) -> Result<Value> {
        let mut attempt = 0;
        let mut backoff = Duration::from_millis(250);
        let request_url = build_chat_url(&self.base_url);
        let deadline = Instant::now() + timeout;

        loop {
            let mut request = self
                .http
                .post(&request_url)
                .timeout(deadline.saturating_duration_since(Instant::now()))
                .header("Content-Type", "application/json")
                .header("X-Title", "travel-planner");

            if let Some(api_key) = &self.api_key {
                request = request.header("Authorization", format!("Bearer {}", api_key));
            }

            let response = request.json(body).send().await.map_err(|err| {
                if err.is_timeout() {
                    AgentError::Timeout(format!("Chat completion request timed out: {err}"))
                } else {
                    AgentError::Backend(format!("HTTP request failed: {err}"))
                }
            })?;

            let status = response.status();
            let headers = response.headers().clone();
            let response_text = response
                .text()
                .await
                .map_err(|err| AgentError::Backend(format!("Failed to read response: {err}")))?;

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_duration = headers
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(backoff);

                // A wait that outlives the caller's budget is reported as a
                // rate limit, not left to run into the timeout
                let remaining = deadline.saturating_duration_since(Instant::now());
                if attempt < self.max_retries && retry_after_duration < remaining {
                    warn!(
                        attempt = attempt + 1,
                        wait_ms = retry_after_duration.as_millis() as u64,
                        "rate limited by backend, retrying"
                    );
                    tokio::time::sleep(retry_after_duration).await;
                    attempt += 1;
                    backoff *= 2;
                    continue;
                }

                return Err(AgentError::RateLimit {
                    retry_after: retry_after_duration.as_secs().max(1),
                });
            }

            if status.is_server_error()
                && attempt < self.max_retries
                && backoff < deadline.saturating_duration_since(Instant::now())
            {
                warn!(attempt = attempt + 1, %status, "backend server error, retrying");
                tokio::time::sleep(backoff).await;
                attempt += 1;
                backoff *= 2;
                continue;
            }

            let response_json: Value = match serde_json::from_str(&response_text) {
                Ok(value) => value,
                Err(_) if !status.is_success() => {
                    return Err(AgentError::Backend(format!(
                        "HTTP {} error: {}",
                        status, response_text
                    )));
                }
                Err(err) => {
                    return Err(AgentError::Backend(format!("Failed to parse JSON: {err}")));
                }
            };

            if !status.is_success() {
                let api_message = response_json
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or(response_text);

                return Err(AgentError::Backend(format!(
                    "HTTP {} error: {}",
                    status, api_message
                )));
            }

            if let Some(error) = response_json.get("error") {
                let error_message = error
                    .get("message")
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| error.to_string());
                return Err(AgentError::Backend(format!("API error: {}", error_message)));
            }

            return Ok(response_json);
        }
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    tools: Vec<Value>,
    tool_choice: Option<Value>,
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
            tool_choice: None,
            max_tokens: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: Value) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
            "stream": false,
        });

        if !self.tools.is_empty() {
            body["tools"] = Value::Array(self.tools);
        }

        if let Some(tool_choice) = self.tool_choice {
            body["tool_choice"] = tool_choice;
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chat_url() {
        assert_eq!(
            build_chat_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost:11434/v1/chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_omits_empty_tools() {
        let body = ChatCompletionRequest::new("m", vec![json!({"role": "user", "content": "hi"})])
            .with_max_tokens(Some(64))
            .into_value();

        assert_eq!(body["model"], "m");
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 64);
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn test_request_body_with_tools() {
        let body = ChatCompletionRequest::new("m", Vec::new())
            .with_tools(vec![json!({"type": "function"})])
            .with_tool_choice(json!("auto"))
            .into_value();

        assert_eq!(body["tools"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["tool_choice"], "auto");
    }
}
