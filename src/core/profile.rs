//! Immutable role configuration for the travel agents.
//!
//! Each agent gets a fixed name, role line and description plus an ordered
//! list of [`Focus`] directives. A role only accepts its own focus areas, so
//! a profile can't ask the tool-less planner to search or the info agent to
//! book hotels.

use crate::error::{AgentError, Result};
use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Destination,
    Logistics,
    Info,
    Planner,
}

impl AgentRole {
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Destination,
        AgentRole::Logistics,
        AgentRole::Info,
        AgentRole::Planner,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AgentRole::Destination => "Destination Intelligence Agent",
            AgentRole::Logistics => "Travel Logistics Agent",
            AgentRole::Info => "Info Agent",
            AgentRole::Planner => "Master Travel Planner",
        }
    }

    pub fn role_line(&self) -> &'static str {
        match self {
            AgentRole::Destination => "Expert destination and activities analyst",
            AgentRole::Logistics => "Expert in accommodation and transportation planning",
            AgentRole::Info => {
                "Expert in researching and providing the basic information given an itinerary"
            }
            AgentRole::Planner => "Coordinator of the destination and logistics specialists",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AgentRole::Destination => {
                "You are an expert travel researcher and cultural curator specializing in \
                 comprehensive destination analysis. You provide detailed information about \
                 locations, activities, cultural experiences, and safety considerations."
            }
            AgentRole::Logistics => {
                "You are a logistics expert specializing in accommodation and transportation \
                 planning. You provide comprehensive solutions for where to stay and how to \
                 get around."
            }
            AgentRole::Info => {
                "You are an expert specializing in researching and providing vital information \
                 and tips based on an itinerary."
            }
            AgentRole::Planner => {
                "You are a comprehensive travel planner who creates detailed itineraries and \
                 manages budgets."
            }
        }
    }

    /// Whether agents in this role are handed the web search tool
    pub fn uses_search(&self) -> bool {
        !matches!(self, AgentRole::Planner)
    }

    pub fn allows(&self, focus: Focus) -> bool {
        self.default_focus().contains(&focus)
    }

    /// Every focus area the role accepts, in prompt order
    pub fn default_focus(&self) -> &'static [Focus] {
        match self {
            AgentRole::Destination => &[
                Focus::Attractions,
                Focus::Weather,
                Focus::Customs,
                Focus::SafetyAdvisories,
                Focus::InterestActivities,
                Focus::PracticalInfo,
                Focus::PrioritizeInterests,
            ],
            AgentRole::Logistics => &[
                Focus::Accommodation,
                Focus::Transportation,
                Focus::RoutePlanning,
                Focus::CostEstimates,
                Focus::BookingTips,
                Focus::BudgetConstraints,
                Focus::ConvenienceAndValue,
            ],
            AgentRole::Info => &[Focus::ItineraryGrounded, Focus::OrganizedAnswers],
            AgentRole::Planner => &[
                Focus::CompleteItinerary,
                Focus::DestinationInput,
                Focus::LogisticsInput,
                Focus::DayByDay,
                Focus::ClearFormatting,
            ],
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One instruction category an agent can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Attractions,
    Weather,
    Customs,
    SafetyAdvisories,
    InterestActivities,
    PracticalInfo,
    PrioritizeInterests,
    Accommodation,
    Transportation,
    RoutePlanning,
    CostEstimates,
    BookingTips,
    BudgetConstraints,
    ConvenienceAndValue,
    ItineraryGrounded,
    OrganizedAnswers,
    CompleteItinerary,
    DestinationInput,
    LogisticsInput,
    DayByDay,
    ClearFormatting,
}

impl Focus {
    pub fn directive(&self) -> &'static str {
        match self {
            Focus::Attractions => "Cover major attractions, local culture, and best times to visit",
            Focus::Weather => "Describe weather patterns and seasonal considerations",
            Focus::Customs => "Explain local customs, cultural events, and unique experiences",
            Focus::SafetyAdvisories => "Include safety information and travel advisories",
            Focus::InterestActivities => {
                "Suggest activities and experiences matching user interests"
            }
            Focus::PracticalInfo => "Give practical information (time zones, currency, customs)",
            Focus::PrioritizeInterests => {
                "Format information clearly and prioritize based on user interests"
            }
            Focus::Accommodation => {
                "Recommend accommodation options with price ranges and location analysis"
            }
            Focus::Transportation => {
                "Lay out transportation options (flights, local transit, car rentals)"
            }
            Focus::RoutePlanning => "Plan routes and transfer considerations",
            Focus::CostEstimates => "Estimate the cost of all logistics",
            Focus::BookingTips => "Share booking tips and recommendations",
            Focus::BudgetConstraints => "Consider budget level and practical constraints",
            Focus::ConvenienceAndValue => "Optimize for convenience and value",
            Focus::ItineraryGrounded => {
                "Base every answer on the provided itinerary and up-to-date search results"
            }
            Focus::OrganizedAnswers => {
                "Provide complete and well-organized answers to the user query"
            }
            Focus::CompleteItinerary => {
                "Create complete, detailed, well-organized travel itineraries"
            }
            Focus::DestinationInput => {
                "Build on the destination analysis for locations and activities"
            }
            Focus::LogisticsInput => {
                "Build on the logistics research for accommodation and transport"
            }
            Focus::DayByDay => "Create a very detailed day-by-day itinerary",
            Focus::ClearFormatting => "Format everything in a clear, organized manner",
        }
    }
}

const SEARCH_FIRST: &str =
    "Start with a web_search tool call to obtain the most relevant and up-to-date information.";

/// Validated, immutable configuration of one agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    role: AgentRole,
    search_first: bool,
    focus: Vec<Focus>,
}

impl AgentProfile {
    /// The stock profile for a role
    pub fn for_role(role: AgentRole) -> Self {
        Self {
            role,
            search_first: role.uses_search(),
            focus: role.default_focus().to_vec(),
        }
    }

    pub fn builder(role: AgentRole) -> ProfileBuilder {
        ProfileBuilder {
            role,
            search_first: role.uses_search(),
            focus: Vec::new(),
        }
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn name(&self) -> &'static str {
        self.role.name()
    }

    pub fn search_first(&self) -> bool {
        self.search_first
    }

    pub fn focus(&self) -> &[Focus] {
        &self.focus
    }

    /// Render the system prompt. `searchable` is false when no search tool
    /// was attached, which drops the search-first directive.
    pub fn system_prompt(&self, now: DateTime<Local>, searchable: bool) -> String {
        let mut instructions: Vec<&str> = Vec::with_capacity(self.focus.len() + 1);
        if self.search_first && searchable {
            instructions.push(SEARCH_FIRST);
        }
        instructions.extend(self.focus.iter().map(Focus::directive));

        let numbered = instructions
            .iter()
            .enumerate()
            .map(|(idx, line)| format!("{}. {}", idx + 1, line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are the {name}. Role: {role}.\n{description}\n\n## Instructions\n{numbered}\n\n\
             Use markdown to format your answers.\nThe current time is {now}.",
            name = self.role.name(),
            role = self.role.role_line(),
            description = self.role.description(),
            numbered = numbered,
            now = now.format("%Y-%m-%d %H:%M:%S %:z"),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    role: AgentRole,
    search_first: bool,
    focus: Vec<Focus>,
}

impl ProfileBuilder {
    pub fn focus(mut self, focus: Focus) -> Self {
        self.focus.push(focus);
        self
    }

    pub fn search_first(mut self, enabled: bool) -> Self {
        self.search_first = enabled;
        self
    }

    pub fn build(self) -> Result<AgentProfile> {
        if self.focus.is_empty() {
            return Err(AgentError::Config(format!(
                "{} needs at least one focus area",
                self.role
            )));
        }

        if self.search_first && !self.role.uses_search() {
            return Err(AgentError::Config(format!(
                "{} has no search tool and cannot be told to search first",
                self.role
            )));
        }

        for (idx, focus) in self.focus.iter().enumerate() {
            if !self.role.allows(*focus) {
                return Err(AgentError::Config(format!(
                    "{:?} is not a focus area of the {}",
                    focus, self.role
                )));
            }
            if self.focus[..idx].contains(focus) {
                return Err(AgentError::Config(format!(
                    "{:?} listed twice for the {}",
                    focus, self.role
                )));
            }
        }

        Ok(AgentProfile {
            role: self.role,
            search_first: self.search_first,
            focus: self.focus,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_stock_profiles_validate() {
        for role in AgentRole::ALL {
            let stock = AgentProfile::for_role(role);
            let rebuilt = role
                .default_focus()
                .iter()
                .fold(AgentProfile::builder(role), |builder, focus| {
                    builder.focus(*focus)
                })
                .build()
                .unwrap();
            assert_eq!(stock, rebuilt);
        }
    }

    #[test]
    fn test_specialist_prompt_searches_first() {
        let prompt = AgentProfile::for_role(AgentRole::Logistics).system_prompt(fixed_now(), true);
        assert!(prompt.starts_with("You are the Travel Logistics Agent."));
        assert!(prompt.contains("1. Start with a web_search tool call"));
        assert!(prompt.contains("Optimize for convenience and value"));
        assert!(prompt.contains("The current time is 2026-05-01 09:30:00"));
    }

    #[test]
    fn test_prompt_without_search_tool() {
        let prompt = AgentProfile::for_role(AgentRole::Info).system_prompt(fixed_now(), false);
        assert!(!prompt.contains("web_search"));
        assert!(prompt.contains("1. Base every answer on the provided itinerary"));
    }

    #[test]
    fn test_planner_never_searches() {
        let planner = AgentProfile::for_role(AgentRole::Planner);
        assert!(!planner.search_first());
        assert!(!planner.system_prompt(fixed_now(), true).contains("web_search"));

        let err = AgentProfile::builder(AgentRole::Planner)
            .focus(Focus::DayByDay)
            .search_first(true)
            .build()
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_foreign_focus_rejected() {
        let err = AgentProfile::builder(AgentRole::Info)
            .focus(Focus::BookingTips)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("BookingTips"));
    }

    #[test]
    fn test_duplicate_and_empty_focus_rejected() {
        assert!(AgentProfile::builder(AgentRole::Destination)
            .focus(Focus::Weather)
            .focus(Focus::Weather)
            .build()
            .is_err());
        assert!(AgentProfile::builder(AgentRole::Destination).build().is_err());
    }
}
