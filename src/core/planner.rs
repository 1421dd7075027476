use super::agent::{Agent, AgentRunner};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub(crate) const CONTEXT_SEPARATOR: &str = "=========================================";

/// Master planner: asks the destination and logistics specialists first,
/// then has its own coordinator merge both reports into one itinerary.
pub struct PlannerAgent {
    coordinator: Agent,
    destination: Arc<dyn AgentRunner>,
    logistics: Arc<dyn AgentRunner>,
}

impl PlannerAgent {
    pub fn new(
        coordinator: Agent,
        destination: Arc<dyn AgentRunner>,
        logistics: Arc<dyn AgentRunner>,
    ) -> Self {
        Self {
            coordinator,
            destination,
            logistics,
        }
    }

    pub fn coordinator(&self) -> &Agent {
        &self.coordinator
    }
}

impl std::fmt::Debug for PlannerAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerAgent")
            .field("coordinator", &self.coordinator.profile().name())
            .field("destination", &self.destination.name())
            .field("logistics", &self.logistics.name())
            .finish()
    }
}

#[async_trait]
impl AgentRunner for PlannerAgent {
    fn name(&self) -> &str {
        self.coordinator.profile().name()
    }

    async fn run(&self, query: &str) -> Result<String> {
        info!(target: "travel_planner::planner", agent = self.destination.name(), "consulting");
        let destination_report = self.destination.run(query).await?;

        info!(target: "travel_planner::planner", agent = self.logistics.name(), "consulting");
        let logistics_report = self.logistics.run(query).await?;

        let prompt = compose_brief(
            query,
            &[
                (self.destination.name(), destination_report.as_str()),
                (self.logistics.name(), logistics_report.as_str()),
            ],
        );
        self.coordinator.run(&prompt).await
    }
}

/// Embed the specialists' reports under the original request
pub(crate) fn compose_brief(query: &str, reports: &[(&str, &str)]) -> String {
    let mut brief = query.trim_end().to_string();
    for (agent, report) in reports {
        brief.push_str(&format!(
            "\n\n{CONTEXT_SEPARATOR}\nReport from the {agent}:\n{report}"
        ));
    }
    brief.push_str(&format!(
        "\n\n{CONTEXT_SEPARATOR}\nUsing both reports, write the final day-by-day itinerary."
    ));
    brief
}
