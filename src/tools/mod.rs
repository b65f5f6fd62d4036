use crate::error::{Result, ToolError};
use crate::mcp::contracts;
use crate::mcp::types::{ToolDefinition, ToolResult};
use crate::remote::{ApiClient, Operation};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    BuildPpt,
    QueryPpt,
    DownloadPpt,
    EditorPpt,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::BuildPpt,
        Tool::QueryPpt,
        Tool::DownloadPpt,
        Tool::EditorPpt,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::BuildPpt => contracts::TOOL_BUILD_PPT,
            Tool::QueryPpt => contracts::TOOL_QUERY_PPT,
            Tool::DownloadPpt => contracts::TOOL_DOWNLOAD_PPT,
            Tool::EditorPpt => contracts::TOOL_EDITOR_PPT,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::BuildPpt => contracts::BUILD_PPT_DESCRIPTION,
            Tool::QueryPpt => contracts::QUERY_PPT_DESCRIPTION,
            Tool::DownloadPpt => contracts::DOWNLOAD_PPT_DESCRIPTION,
            Tool::EditorPpt => contracts::EDITOR_PPT_DESCRIPTION,
        }
    }

    pub fn input_schema(self) -> Value {
        match self {
            Tool::BuildPpt => contracts::build_ppt_schema(),
            Tool::QueryPpt => contracts::query_ppt_schema(),
            Tool::DownloadPpt => contracts::download_ppt_schema(),
            Tool::EditorPpt => contracts::editor_ppt_schema(),
        }
    }

    /// The single required argument.
    pub fn argument(self) -> &'static str {
        match self {
            Tool::BuildPpt => "text",
            Tool::QueryPpt => "ppt_id",
            Tool::DownloadPpt | Tool::EditorPpt => "id",
        }
    }

    pub fn operation(self) -> Operation {
        match self {
            Tool::BuildPpt => Operation::Build,
            Tool::QueryPpt => Operation::Query,
            Tool::DownloadPpt => Operation::Download,
            Tool::EditorPpt => Operation::Editor,
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }

    fn extract_argument(self, args: &Value) -> Result<&str> {
        let key = self.argument();
        match args.get(key) {
            None | Some(Value::Null) => Err(ToolError::MissingArgument(key)),
            Some(value) => value.as_str().ok_or(ToolError::InvalidArgument(key)),
        }
    }

    pub fn run(self, client: &ApiClient, args: &Value) -> Result<ToolResult> {
        let value = self.extract_argument(args)?;
        client.call(self.operation(), value)
    }
}

/// Resolves `name` and runs it; every failure becomes an error envelope.
pub fn call_tool(client: &ApiClient, name: &str, args: &Value) -> ToolResult {
    let Some(tool) = Tool::from_name(name) else {
        warn!(tool = name, "unknown tool");
        return ToolResult::error(format!("Unknown tool: {name}"));
    };

    debug!(tool = name, "calling tool");
    match tool.run(client, args) {
        Ok(result) => result,
        Err(err) => {
            warn!(tool = name, error = %err, "tool call failed");
            ToolResult::error(format!("Error: {err}"))
        }
    }
}
