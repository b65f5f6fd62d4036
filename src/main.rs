use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::io;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod mcp;
mod remote;
mod tools;

use config::{API_BASE_VAR, Credential, DEFAULT_API_BASE};
use mcp::types::ToolResult;
use remote::ApiClient;
use tools::Tool;

#[derive(Parser)]
#[command(name = "mcp-chatppt")]
#[command(version, about = "MCP server and CLI for the ChatPPT generation service")]
struct Cli {
    /// ChatPPT API base URL
    #[arg(long, global = true, env = API_BASE_VAR, default_value = DEFAULT_API_BASE)]
    api_base: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
    },
    /// Start a PPT generation task from text or markdown
    Build {
        #[arg(long)]
        text: String,
    },
    /// Query generation progress of a PPT task
    Query {
        #[arg(long)]
        ppt_id: String,
    },
    /// Get the download URL of a generated PPT
    Download {
        #[arg(long)]
        id: String,
    },
    /// Get the editor URL of a generated PPT
    Editor {
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let credential = Credential::from_env().inspect_err(|err| tracing::error!("{err}"))?;
    let client = ApiClient::new(config::normalize_base_url(&cli.api_base), credential)
        .context("failed to build HTTP client")?;

    match cli.command {
        Commands::Serve { stdio } => {
            if stdio {
                run_stdio_server(&client)
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::Build { text } => run_tool(&client, Tool::BuildPpt, json!({ "text": text })),
        Commands::Query { ppt_id } => {
            run_tool(&client, Tool::QueryPpt, json!({ "ppt_id": ppt_id }))
        }
        Commands::Download { id } => run_tool(&client, Tool::DownloadPpt, json!({ "id": id })),
        Commands::Editor { id } => run_tool(&client, Tool::EditorPpt, json!({ "id": id })),
    }
}

// stdout carries the protocol, so logs go to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
}

fn run_stdio_server(client: &ApiClient) -> Result<()> {
    info!(base_url = client.base_url(), "Chatppt MCP server running on stdio");
    let stdin = io::stdin();
    let stdout = io::stdout();
    mcp::server::serve(client, stdin.lock(), io::BufWriter::new(stdout.lock()))
        .inspect_err(|err| tracing::error!("fatal error running server: {err:#}"))
}

fn run_tool(client: &ApiClient, tool: Tool, args: Value) -> Result<()> {
    let result = tools::call_tool(client, tool.name(), &args);
    print_tool_result(&result)
}

fn print_tool_result(result: &ToolResult) -> Result<()> {
    if result.is_error {
        eprintln!("{}", result.first_text());
        process::exit(1);
    }
    println!("{}", result.first_text());
    Ok(())
}
