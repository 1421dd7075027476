//! The presentation flow: one form submission, one master itinerary, then
//! the follow-up tabs in a fixed order.

pub mod export;
pub mod queries;
pub mod state;
pub mod tab;

pub use export::{file_name, write_itinerary};
pub use queries::{master_query, tab_query};
pub use state::{PlanningSession, Stage, FEEDBACK_ACK};
pub use tab::{Tab, TabAgent, EMERGENCY_CONTACTS, QUICK_LINKS};

use crate::{
    core::{AgentRunner, TravelTeam},
    error::{AgentError, Result},
    types::TripRequest,
};
use std::time::Instant;
use tracing::{info, instrument};

/// Where results are shown as they arrive
pub trait Surface: Send {
    /// Called before each agent call so the surface can show progress
    fn working(&mut self, _message: &str) {}

    fn show_master(&mut self, request: &TripRequest, itinerary: &str);

    fn show_tab(&mut self, tab: Tab, content: &str);

    fn show_emergency_contacts(&mut self) {}
}

/// Drives a submitted [`PlanningSession`] through the team
#[derive(Debug, Clone)]
pub struct TripPlanner {
    team: TravelTeam,
}

impl TripPlanner {
    pub fn new(team: TravelTeam) -> Self {
        Self { team }
    }

    pub fn team(&self) -> &TravelTeam {
        &self.team
    }

    /// Run the master plan and every tab, strictly one after another. Any
    /// agent failure aborts the session and no later query is issued. A
    /// session that is not freshly submitted is returned untouched with an
    /// `InvalidTransition` error.
    #[instrument(skip_all, target = "travel_planner::session")]
    pub async fn run(
        &self,
        session: &mut PlanningSession,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        if session.stage() != Stage::Submitted {
            return Err(AgentError::InvalidTransition {
                state: session.stage().to_string(),
                action: "start planning",
            });
        }
        match self.drive(session, surface).await {
            Ok(()) => Ok(()),
            Err(err) => {
                session.abort(&err);
                Err(err)
            }
        }
    }

    async fn drive(&self, session: &mut PlanningSession, surface: &mut dyn Surface) -> Result<()> {
        let started = Instant::now();

        let query = session.begin_master()?;
        surface.working("Researching and planning your trip...");
        let itinerary = self.team.planner.run(&query).await?;
        session.record_master(itinerary)?;
        if let (Some(request), Some(itinerary)) = (session.request(), session.master_itinerary()) {
            surface.show_master(request, itinerary);
        }

        for tab in Tab::ALL {
            let query = session.begin_tab(tab)?;
            let agent = self.agent_for(tab);
            surface.working(&format!("Asking the {} for {}...", agent.name(), tab));
            let content = agent.run(&query).await?;
            session.record_tab(tab, content)?;
            surface.show_tab(tab, session.tab_output(tab).unwrap_or_default());
        }

        surface.show_emergency_contacts();
        session.finish()?;

        info!(
            target: "travel_planner::session",
            elapsed_ms = started.elapsed().as_millis() as u64,
            "planning complete"
        );
        Ok(())
    }

    fn agent_for(&self, tab: Tab) -> &dyn AgentRunner {
        match tab.agent() {
            TabAgent::Logistics => self.team.logistics.as_ref(),
            TabAgent::Info => self.team.info.as_ref(),
        }
    }
}
