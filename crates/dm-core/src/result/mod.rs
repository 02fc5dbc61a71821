//! Command Result: the two-field record every Docker tool returns.

use serde::{Deserialize, Serialize};

/// Prefix of the `display` text for a command that exited non-zero.
pub const FAILURE_PREFIX: &str = "❌ Command failed:";

/// Outcome of a single external command.
///
/// On the wire the fields are named `result` and `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Trimmed stdout on success, trimmed stderr on failure.
    #[serde(rename = "result")]
    pub output: String,

    /// Same as `output` on success; a failure banner naming the command otherwise.
    #[serde(rename = "text")]
    pub display: String,
}

impl CommandResult {
    /// Build the record for a zero exit status.
    pub fn success(stdout: &str) -> Self {
        let output = stdout.trim().to_string();
        Self {
            display: output.clone(),
            output,
        }
    }

    /// Build the record for a non-zero exit status.
    pub fn failure<S: AsRef<str>>(argv: &[S], stderr: &str) -> Self {
        let output = stderr.trim().to_string();
        let command = argv
            .iter()
            .map(|a| a.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            display: format!("{FAILURE_PREFIX} {command}\n{output}"),
            output,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.display != self.output && self.display.starts_with(FAILURE_PREFIX)
    }
}
