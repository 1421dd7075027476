//! Tool abstractions and the web search tool the specialist agents use

pub mod function_factory;
pub mod tool;
pub mod web_search;

pub use function_factory::FunctionFactory;
pub use tool::{Tool, ToolFuture, ToolRegistry};
pub use web_search::{SearchConfig, SearchProvider, SearchResult, WebSearchTool};
