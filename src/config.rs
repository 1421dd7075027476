use crate::{
    core::agent::DEFAULT_MODEL,
    error::{AgentError, Result},
    services::openai_client::DEFAULT_BASE_URL,
    tools::SearchConfig,
};
use std::{fmt, time::Duration};

/// Backend and search settings shared by every agent
#[derive(Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_iterations: usize,
    pub max_tokens: Option<u32>,
    pub search: Option<SearchConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
            max_iterations: 10,
            max_tokens: Some(4096),
            search: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_iterations", &self.max_iterations)
            .field("max_tokens", &self.max_tokens)
            .field("search", &self.search)
            .finish()
    }
}

impl Settings {
    /// Read settings from the process environment. Call `dotenvy::dotenv()`
    /// first to pick up a `.env` file.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: non_empty_var("OPENAI_API_KEY"),
            base_url: non_empty_var("OPENAI_BASE_URL")
                .or_else(|| non_empty_var("OPENROUTER_BASE_URL"))
                .unwrap_or(defaults.base_url),
            model: non_empty_var("MODEL").unwrap_or(defaults.model),
            search: SearchConfig::from_env(),
            ..defaults
        }
    }

    /// The hosted default endpoint needs a key; a custom endpoint (local
    /// model server) may run without one.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_none() && self.base_url.trim_end_matches('/') == DEFAULT_BASE_URL {
            return Err(AgentError::Config(
                "OPENAI_API_KEY must be set (or pass --api-key) to use the default backend"
                    .to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(AgentError::Config(
                "max iterations must be at least 1".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(AgentError::Config("model name is empty".to_string()));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_requires_key() {
        let settings = Settings::default();
        assert!(matches!(settings.validate(), Err(AgentError::Config(_))));

        let settings = Settings {
            api_key: Some("sk-test".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_local_backend_without_key() {
        let settings = Settings {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llama3.2".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let settings = Settings {
            api_key: Some("sk-test".to_string()),
            max_iterations: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = Settings {
            api_key: Some("sk-very-secret".to_string()),
            ..Settings::default()
        };
        assert!(!format!("{:?}", settings).contains("sk-very-secret"));
    }
}
