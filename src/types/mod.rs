pub mod budget;
pub mod result;
pub mod trip;

pub use budget::{format_currency, BudgetBreakdown, BudgetMetrics};
pub use result::{RunResult, TokenUsage};
pub use trip::{BudgetTier, Interest, TripForm, TripRequest};
