use crate::mcp::types::ToolDefinition;
use crate::tools::Tool;

pub mod contracts;
pub mod server;
pub mod types;

pub fn tool_definitions() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}
