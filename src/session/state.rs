use super::{
    queries::{master_query, tab_query},
    tab::Tab,
};
use crate::{
    error::{AgentError, Result},
    types::{TripForm, TripRequest},
};
use std::fmt;
use tracing::{debug, info};

pub const FEEDBACK_ACK: &str = "Thank you for your feedback!";

/// Where a planning session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AwaitingInput,
    Submitted,
    PlanningMaster,
    DisplayingMaster,
    Querying(Tab),
    DisplayingTab(Tab),
    AwaitingFeedback,
    Aborted,
}

impl Stage {
    /// Between a submitted form and the last tab shown
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Stage::Submitted
                | Stage::PlanningMaster
                | Stage::DisplayingMaster
                | Stage::Querying(_)
                | Stage::DisplayingTab(_)
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Querying(tab) => write!(f, "Querying({:?})", tab),
            Stage::DisplayingTab(tab) => write!(f, "DisplayingTab({:?})", tab),
            other => write!(f, "{:?}", other),
        }
    }
}

/// All state of one form submission, advanced only through the transition
/// methods below
#[derive(Debug, Clone)]
pub struct PlanningSession {
    stage: Stage,
    request: Option<TripRequest>,
    master: Option<String>,
    tabs: Vec<(Tab, String)>,
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningSession {
    pub fn new() -> Self {
        Self {
            stage: Stage::AwaitingInput,
            request: None,
            master: None,
            tabs: Vec::with_capacity(Tab::ALL.len()),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn request(&self) -> Option<&TripRequest> {
        self.request.as_ref()
    }

    pub fn master_itinerary(&self) -> Option<&str> {
        self.master.as_deref()
    }

    pub fn tab_output(&self, tab: Tab) -> Option<&str> {
        self.tabs
            .iter()
            .find(|(shown, _)| *shown == tab)
            .map(|(_, text)| text.as_str())
    }

    /// Tabs answered so far, in display order
    pub fn tabs(&self) -> &[(Tab, String)] {
        &self.tabs
    }

    /// The tab that should be queried next, if any
    pub fn next_tab(&self) -> Option<Tab> {
        Tab::ALL.get(self.tabs.len()).copied()
    }

    /// `AwaitingInput → Submitted`. A rejected form leaves the session
    /// waiting for input.
    pub fn submit(&mut self, form: TripForm) -> Result<&TripRequest> {
        self.require(Stage::AwaitingInput, "submit the form")?;
        let request = TripRequest::try_from(form)?;
        info!(
            target: "travel_planner::session",
            destination = request.destination(),
            days = request.duration_days(),
            travelers = request.travelers(),
            "trip submitted"
        );
        self.stage = Stage::Submitted;
        Ok(self.request.insert(request))
    }

    /// `Submitted → PlanningMaster`; returns the planner query
    pub fn begin_master(&mut self) -> Result<String> {
        self.require(Stage::Submitted, "start planning")?;
        let query = master_query(self.submitted()?);
        self.transition(Stage::PlanningMaster);
        Ok(query)
    }

    /// `PlanningMaster → DisplayingMaster`
    pub fn record_master(&mut self, itinerary: String) -> Result<()> {
        self.require(Stage::PlanningMaster, "record the itinerary")?;
        self.transition(Stage::DisplayingMaster);
        self.master = Some(itinerary);
        Ok(())
    }

    /// `DisplayingMaster | DisplayingTab(previous) → Querying(tab)`; tabs
    /// must go in [`Tab::ALL`] order. Returns the tab's query.
    pub fn begin_tab(&mut self, tab: Tab) -> Result<String> {
        let ready = match self.stage {
            Stage::DisplayingMaster => tab.index() == 0,
            Stage::DisplayingTab(previous) => previous.index() + 1 == tab.index(),
            _ => false,
        };
        if !ready || self.next_tab() != Some(tab) {
            return Err(self.invalid("query a tab out of order"));
        }

        let request = self.submitted()?;
        let itinerary = self
            .master
            .as_deref()
            .ok_or_else(|| self.invalid("query a tab without an itinerary"))?;
        let query = tab_query(tab, request, itinerary);
        self.transition(Stage::Querying(tab));
        Ok(query)
    }

    /// `Querying(tab) → DisplayingTab(tab)`
    pub fn record_tab(&mut self, tab: Tab, content: String) -> Result<()> {
        self.require(Stage::Querying(tab), "record a tab")?;
        self.transition(Stage::DisplayingTab(tab));
        self.tabs.push((tab, content));
        Ok(())
    }

    /// `DisplayingTab(last) → AwaitingFeedback`
    pub fn finish(&mut self) -> Result<()> {
        if self.next_tab().is_some() || !matches!(self.stage, Stage::DisplayingTab(_)) {
            return Err(self.invalid("finish before every tab is shown"));
        }
        self.transition(Stage::AwaitingFeedback);
        Ok(())
    }

    /// Any in-flight stage `→ Aborted`; later stages are never reached.
    /// Returns false and leaves the session alone when nothing is in flight.
    pub fn abort(&mut self, error: &AgentError) -> bool {
        if !self.stage.is_in_flight() {
            debug!(
                target: "travel_planner::session",
                stage = %self.stage,
                "nothing in flight to abort"
            );
            return false;
        }
        info!(
            target: "travel_planner::session",
            stage = %self.stage,
            error = %error,
            "planning aborted"
        );
        self.stage = Stage::Aborted;
        true
    }

    /// Feedback is acknowledged and dropped
    pub fn submit_feedback(&mut self, feedback: &str) -> Result<&'static str> {
        self.require(Stage::AwaitingFeedback, "submit feedback")?;
        debug!(
            target: "travel_planner::session",
            chars = feedback.chars().count(),
            "feedback received"
        );
        Ok(FEEDBACK_ACK)
    }

    fn submitted(&self) -> Result<&TripRequest> {
        self.request
            .as_ref()
            .ok_or_else(|| self.invalid("continue without a trip request"))
    }

    fn require(&self, stage: Stage, action: &'static str) -> Result<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> AgentError {
        AgentError::InvalidTransition {
            state: self.stage.to_string(),
            action,
        }
    }

    fn transition(&mut self, next: Stage) {
        debug!(target: "travel_planner::session", from = %self.stage, to = %next, "transition");
        self.stage = next;
    }
}
