//! Whelk MCP Server
//!
//! This binary runs the whelk shell as an MCP server over stdio. One
//! shell session is shared by all tool calls, so the working directory
//! and command history persist for the lifetime of the process.

use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use whelk::{HttpSuggester, Shell};
use whelk_mcp::WhelkServer;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "whelk-mcp", about = "MCP server for the whelk shell")]
struct Args {
    /// Starting working directory for the shell session.
    #[arg(long)]
    dir: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing - output to stderr so it doesn't interfere with MCP stdio
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    tracing::info!("Starting whelk MCP server");

    let mut builder = Shell::builder();
    if let Some(dir) = args.dir {
        builder = builder.start_dir(dir);
    }
    match HttpSuggester::from_env() {
        Some(suggester) => builder = builder.suggester(suggester),
        None => tracing::info!("WHELK_API_KEY not set; natural-language suggestions disabled"),
    }
    let shell = builder.build()?;

    let service = WhelkServer::new(shell)
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to start MCP service: {}", e);
        })?;

    tracing::info!("Whelk MCP server running");

    service.waiting().await?;

    tracing::info!("Whelk MCP server shutting down");

    Ok(())
}
