//! Command-line and environment configuration.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "docker-manager",
    version,
    about = "MCP server exposing Docker CLI operations as tools over stdio"
)]
pub struct Config {
    /// Program invoked for every Docker command
    #[arg(long, env = "DOCKER_MANAGER_DOCKER_BIN", default_value = "docker")]
    pub docker_bin: String,

    /// Log filter directive, e.g. `debug` or `dm_executor=debug` (falls back to RUST_LOG)
    #[arg(long, env = "DOCKER_MANAGER_LOG")]
    pub log_level: Option<String>,

    /// Server name reported to clients during initialize
    #[arg(long, env = "DOCKER_MANAGER_NAME", default_value = "docker-manager")]
    pub name: String,
}
