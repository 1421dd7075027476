//! travel-planner: a multi-agent travel itinerary planner over any
//! OpenAI-compatible chat-completions endpoint
//!
//! Three specialists (destination research, logistics, practical info) and a
//! master planner answer a fixed sequence of queries built from one trip
//! form. The master itinerary comes first; transportation, safety, packing
//! and budget follow-ups are each asked with that itinerary as context.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use travel_planner::{
//!     config::Settings,
//!     session::{PlanningSession, Surface, Tab, TripPlanner},
//!     types::{TripForm, TripRequest},
//!     TravelTeam,
//! };
//!
//! struct Stdout;
//!
//! impl Surface for Stdout {
//!     fn show_master(&mut self, _request: &TripRequest, itinerary: &str) {
//!         println!("{}", itinerary);
//!     }
//!
//!     fn show_tab(&mut self, tab: Tab, content: &str) {
//!         println!("## {}\n{}", tab, content);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let team = TravelTeam::from_settings(&Settings::from_env())?;
//!     let mut session = PlanningSession::new();
//!     session.submit(TripForm {
//!         destination: "Lisbon".to_string(),
//!         ..TripForm::default()
//!     })?;
//!
//!     TripPlanner::new(team).run(&mut session, &mut Stdout).await?;
//!     Ok(())
//! }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod session;
pub mod tools;
pub mod types;

pub use self::core::{
    Agent, AgentMemory, AgentProfile, AgentRole, AgentRunner, AgentStep, Focus, PlannerAgent,
    ProfileBuilder, RunResult, TokenUsage, ToolCall, ToolExecution, ToolOutput, TravelTeam,
};
pub use error::{AgentError, Result};
pub use services::{ChatBackend, ChatCompletionRequest, OpenAIClient};
pub use tools::{FunctionFactory, Tool};
