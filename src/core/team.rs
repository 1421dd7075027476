use super::{
    agent::{Agent, AgentRunner},
    planner::PlannerAgent,
    profile::{AgentProfile, AgentRole},
};
use crate::{
    config::Settings,
    error::Result,
    services::openai_client::{ChatBackend, OpenAIClient},
    tools::{FunctionFactory, WebSearchTool},
};
use std::sync::Arc;
use tracing::{info, warn};

/// The agents one planning session talks to, built once at startup
#[derive(Clone)]
pub struct TravelTeam {
    pub planner: Arc<dyn AgentRunner>,
    pub logistics: Arc<dyn AgentRunner>,
    pub info: Arc<dyn AgentRunner>,
}

impl TravelTeam {
    pub fn new(
        planner: Arc<dyn AgentRunner>,
        logistics: Arc<dyn AgentRunner>,
        info: Arc<dyn AgentRunner>,
    ) -> Self {
        Self {
            planner,
            logistics,
            info,
        }
    }

    /// Build the stock team against the configured HTTP backend
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let backend: Arc<dyn ChatBackend> = Arc::new(
            OpenAIClient::new(settings.api_key.clone()).with_base_url(settings.base_url.clone()),
        );
        let search = settings
            .search
            .as_ref()
            .map(|search| search.provider.to_string())
            .unwrap_or_else(|| "none".to_string());
        info!(
            base_url = %settings.base_url,
            model = %settings.model,
            search = %search,
            "assembling travel team"
        );
        Ok(Self::with_backend(settings, backend))
    }

    /// Build the stock team against any backend
    pub fn with_backend(settings: &Settings, backend: Arc<dyn ChatBackend>) -> Self {
        if settings.search.is_none() {
            warn!("no search provider configured; specialists will answer without web search");
        }

        let build = |role: AgentRole| {
            let mut agent = Agent::new(AgentProfile::for_role(role), Arc::clone(&backend))
                .with_model(settings.model.clone())
                .with_timeout(settings.timeout)
                .with_max_iterations(settings.max_iterations)
                .with_max_tokens(settings.max_tokens);

            if role.uses_search() {
                if let Some(search) = &settings.search {
                    let mut tools = FunctionFactory::new();
                    tools.register_tool(WebSearchTool::new(search.clone()));
                    agent = agent.with_tools(tools);
                }
            }
            agent
        };

        let destination: Arc<dyn AgentRunner> = Arc::new(build(AgentRole::Destination));
        let logistics: Arc<dyn AgentRunner> = Arc::new(build(AgentRole::Logistics));
        let info: Arc<dyn AgentRunner> = Arc::new(build(AgentRole::Info));
        let planner: Arc<dyn AgentRunner> = Arc::new(PlannerAgent::new(
            build(AgentRole::Planner),
            destination,
            Arc::clone(&logistics),
        ));

        Self::new(planner, logistics, info)
    }
}

impl std::fmt::Debug for TravelTeam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelTeam")
            .field("planner", &self.planner.name())
            .field("logistics", &self.logistics.name())
            .field("info", &self.info.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_requires_key_for_default_backend() {
        assert!(TravelTeam::from_settings(&Settings::default()).is_err());
    }

    #[test]
    fn test_stock_team_names() {
        let settings = Settings {
            api_key: Some("sk-test".to_string()),
            ..Settings::default()
        };
        let team = TravelTeam::from_settings(&settings).unwrap();
        assert_eq!(team.planner.name(), "Master Travel Planner");
        assert_eq!(team.logistics.name(), "Travel Logistics Agent");
        assert_eq!(team.info.name(), "Info Agent");
    }
}
