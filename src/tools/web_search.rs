use super::{tool::ToolFuture, Tool};
use crate::AgentError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{fmt, time::Duration};
use tracing::debug;

const DEFAULT_MAX_RESULTS: u32 = 5;
const MAX_RESULTS_CAP: u32 = 10;
const SNIPPET_LIMIT: usize = 300;

/// Parameters accepted by the web search tool
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    /// Free-text web search query
    pub query: String,
    /// Maximum number of ranked results to return (default 5, at most 10)
    #[serde(default)]
    pub max_results: Option<u32>,
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub rank: usize,
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Supported search APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProvider {
    Tavily,
    Brave,
    SerpApi,
}

impl SearchProvider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            SearchProvider::Tavily => "https://api.tavily.com",
            SearchProvider::Brave => "https://api.search.brave.com",
            SearchProvider::SerpApi => "https://serpapi.com",
        }
    }
}

impl fmt::Display for SearchProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchProvider::Tavily => "tavily",
            SearchProvider::Brave => "brave",
            SearchProvider::SerpApi => "serpapi",
        };
        f.write_str(name)
    }
}

/// Which provider to call and with what credentials
#[derive(Clone)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SearchConfig {
    pub fn new(provider: SearchProvider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            base_url: provider.default_base_url().to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pick the first provider with a key in the environment, in order
    /// Tavily, Brave, SerpAPI. `SEARCH_BASE_URL` overrides the endpoint.
    pub fn from_env() -> Option<Self> {
        let candidates = [
            ("TAVILY_API_KEY", SearchProvider::Tavily),
            ("BRAVE_API_KEY", SearchProvider::Brave),
            ("SERPAPI_KEY", SearchProvider::SerpApi),
        ];

        let config = candidates.iter().find_map(|(var, provider)| {
            std::env::var(var)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(|key| Self::new(*provider, key))
        })?;

        Some(match std::env::var("SEARCH_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url),
            _ => config,
        })
    }
}

/// Tool that runs a web search and returns ranked results to the model
#[derive(Debug, Clone)]
pub struct WebSearchTool {
    config: SearchConfig,
    client: Client,
}

impl WebSearchTool {
    pub fn new(config: SearchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    pub fn provider(&self) -> SearchProvider {
        self.config.provider
    }

    /// Run a query against the configured provider
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, AgentError> {
        let base = self.config.base_url.trim_end_matches('/');
        let count = max_results.to_string();

        let request = match self.config.provider {
            SearchProvider::Tavily => self.client.post(format!("{}/search", base)).json(&json!({
                "api_key": self.config.api_key,
                "query": query,
                "max_results": max_results,
                "search_depth": "basic"
            })),
            SearchProvider::Brave => self
                .client
                .get(format!("{}/res/v1/web/search", base))
                .header("X-Subscription-Token", &self.config.api_key)
                .query(&[("q", query), ("count", count.as_str())]),
            SearchProvider::SerpApi => self.client.get(format!("{}/search", base)).query(&[
                ("q", query),
                ("api_key", self.config.api_key.as_str()),
                ("num", count.as_str()),
                ("engine", "google"),
            ]),
        };

        let response = request.send().await.map_err(|err| {
            AgentError::ToolExecution(format!(
                "{} search request failed: {}",
                self.config.provider, err
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::ToolExecution(format!(
                "{} search returned status {}: {}",
                self.config.provider, status, body
            )));
        }

        let body: Value = response.json().await.map_err(|err| {
            AgentError::ToolExecution(format!(
                "Failed to parse {} search response: {}",
                self.config.provider, err
            ))
        })?;

        let results = parse_results(self.config.provider, &body, max_results as usize);
        debug!(
            provider = %self.config.provider,
            query,
            hits = results.len(),
            "web search completed"
        );
        Ok(results)
    }
}

impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web and return ranked results (title, URL, snippet) with up-to-date information"
    }

    fn parameters_schema(&self) -> Value {
        let schema = schemars::schema_for!(SearchParams);
        serde_json::to_value(&schema.schema).unwrap_or_else(|_| {
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            })
        })
    }

    fn execute(&self, parameters: Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: SearchParams =
                serde_path_to_error::deserialize(parameters).map_err(|err| {
                    AgentError::Validation(format!(
                        "Invalid web_search parameters at {}: {}",
                        err.path(),
                        err
                    ))
                })?;

            let max_results = params
                .max_results
                .unwrap_or(DEFAULT_MAX_RESULTS)
                .clamp(1, MAX_RESULTS_CAP);
            let results = self.search(&params.query, max_results).await?;

            Ok(json!({
                "query": params.query,
                "provider": self.config.provider.to_string(),
                "results": results,
            }))
        })
    }
}

fn parse_results(provider: SearchProvider, body: &Value, limit: usize) -> Vec<SearchResult> {
    let (items, link_key, snippet_key) = match provider {
        SearchProvider::Tavily => (&body["results"], "url", "content"),
        SearchProvider::Brave => (&body["web"]["results"], "url", "description"),
        SearchProvider::SerpApi => (&body["organic_results"], "link", "snippet"),
    };

    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .take(limit)
                .enumerate()
                .map(|(idx, item)| SearchResult {
                    rank: idx + 1,
                    title: item["title"].as_str().unwrap_or("(no title)").to_string(),
                    url: item[link_key].as_str().unwrap_or_default().to_string(),
                    snippet: truncate(item[snippet_key].as_str().unwrap_or_default()),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brave_results() {
        let body = json!({
            "web": { "results": [
                { "title": "Louvre", "url": "https://louvre.fr", "description": "Museum" },
                { "title": "Orsay", "url": "https://musee-orsay.fr", "description": "Impressionists" }
            ]}
        });

        let results = parse_results(SearchProvider::Brave, &body, 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].url, "https://musee-orsay.fr");
        assert_eq!(results[1].snippet, "Impressionists");
    }

    #[test]
    fn test_parse_serpapi_respects_limit() {
        let body = json!({
            "organic_results": [
                { "title": "a", "link": "https://a.example", "snippet": "1" },
                { "title": "b", "link": "https://b.example", "snippet": "2" },
                { "title": "c", "link": "https://c.example", "snippet": "3" }
            ]
        });

        let results = parse_results(SearchProvider::SerpApi, &body, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.example");
    }

    #[test]
    fn test_parse_missing_results() {
        assert!(parse_results(SearchProvider::Tavily, &json!({}), 5).is_empty());
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let long = "é".repeat(SNIPPET_LIMIT + 10);
        let truncated = truncate(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), SNIPPET_LIMIT + 3);
    }

    #[test]
    fn test_schema_requires_query() {
        let tool = WebSearchTool::new(SearchConfig::new(SearchProvider::Tavily, "key"));
        let schema = tool.parameters_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|field| field == "query"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SearchConfig::new(SearchProvider::Brave, "super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
