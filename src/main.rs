//! Todoist MCP Server
//!
//! Exposes Todoist tasks, projects, and markdown planning views over MCP
//! stdio transport. Requires `TODOIST_API_TOKEN` in the environment.

use rmcp::{transport::io::stdio, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todoist_mcp::{Config, TodoistMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive("todoist_mcp=info".parse()?))
        .init();

    tracing::info!("Starting Todoist MCP server");

    let config = Config::from_env()?;
    let server = TodoistMcpServer::new(&config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Todoist MCP server running");

    service.waiting().await?;

    tracing::info!("Todoist MCP server stopped");

    Ok(())
}
