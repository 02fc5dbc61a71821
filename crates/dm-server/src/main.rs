//! docker-manager: MCP server entry point.
//!
//! Speaks JSON-RPC on stdin/stdout; logs go to stderr.

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use dm_executor::{DockerTools, SystemInvoker};
use dm_mcp::McpServer;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init_tracing(config.log_level.as_deref())?;

    let version = env!("CARGO_PKG_VERSION");
    tracing::info!(
        docker_bin = %config.docker_bin,
        "Starting {} v{version}",
        config.name
    );

    let tools = DockerTools::with_program(&config.docker_bin, Arc::new(SystemInvoker));
    let server = McpServer::new(&config.name, version, tools);
    tracing::debug!("Registered {} tools", server.tool_count());

    dm_mcp::serve_stdio(&server)
        .await
        .context("stdio transport failed")?;

    Ok(())
}
