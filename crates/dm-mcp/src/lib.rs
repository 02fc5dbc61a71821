//! dm-mcp: MCP (Model Context Protocol) server: protocol types, registry, dispatch, stdio transport.

pub mod protocol;
pub mod registry;
pub mod server;
pub mod transport;

pub use server::McpServer;
pub use transport::{serve, serve_stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
