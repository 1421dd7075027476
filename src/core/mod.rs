pub mod agent;
pub mod memory;
pub mod planner;
pub mod profile;
pub mod steps;
pub mod team;
pub mod tool_call;

pub use crate::types::result::{RunResult, TokenUsage};
pub use agent::{Agent, AgentRunner};
pub use memory::AgentMemory;
pub use planner::PlannerAgent;
pub use profile::{AgentProfile, AgentRole, Focus, ProfileBuilder};
pub use steps::AgentStep;
pub use team::TravelTeam;
pub use tool_call::{ToolCall, ToolExecution, ToolOutput};
