//! dm-executor: Runs Docker commands as external processes.

pub mod docker;
pub mod process;
pub mod runner;

pub use docker::DockerTools;
pub use process::{Invoker, MockInvoker, ProcessOutput, SystemInvoker};
pub use runner::run_command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("empty command")]
    EmptyCommand,
    #[error("process error: {0}")]
    Process(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}
