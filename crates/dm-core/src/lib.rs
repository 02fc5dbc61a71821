//! dm-core: Shared types for docker-manager
//!
//! This crate has zero internal crate dependencies and defines the
//! canonical types used across all other dm-* crates.

pub mod result;
pub mod tool;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::result::CommandResult;
    pub use crate::tool::{docker_tools, ParamSpec, ParamType, ToolSpec};
}
