//! Command runner: turns one process execution into a `CommandResult`.

use crate::{ExecutorError, Invoker};
use dm_core::result::CommandResult;
use std::time::Instant;

/// Execute `argv` once and frame the outcome.
///
/// A non-zero exit is not an error: it becomes a failure `CommandResult`.
/// Only problems starting the process surface as `Err`.
pub async fn run_command(
    invoker: &dyn Invoker,
    argv: &[String],
) -> Result<CommandResult, ExecutorError> {
    if argv.is_empty() {
        return Err(ExecutorError::EmptyCommand);
    }

    let start = Instant::now();
    tracing::debug!(?argv, "running command");

    let output = invoker.invoke(argv).await?;
    let duration_ms = start.elapsed().as_millis() as u64;

    if output.success {
        tracing::info!(command = %argv.join(" "), duration_ms, "command succeeded");
        Ok(CommandResult::success(&output.stdout))
    } else {
        tracing::warn!(
            command = %argv.join(" "),
            code = ?output.code,
            duration_ms,
            "command failed"
        );
        Ok(CommandResult::failure(argv, &output.stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockInvoker, ProcessOutput};

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn zero_exit_mirrors_trimmed_stdout() {
        let mock = MockInvoker::new();
        mock.push_response(ProcessOutput::ok("\n  Docker version 27.0.3, build 7d4bcd8\n"));

        let result = run_command(&mock, &argv(&["docker", "--version"]))
            .await
            .unwrap();

        assert_eq!(result.output, "Docker version 27.0.3, build 7d4bcd8");
        assert_eq!(result.display, result.output);
    }

    #[tokio::test]
    async fn nonzero_exit_uses_stderr_and_names_command() {
        let mock = MockInvoker::new();
        mock.push_response(ProcessOutput {
            success: false,
            code: Some(1),
            stdout: "ignored".into(),
            stderr: "Error: No such image: nope:latest\n".into(),
        });

        let cmd = argv(&["docker", "rmi", "-f", "nope:latest"]);
        let result = run_command(&mock, &cmd).await.unwrap();

        assert_eq!(result.output, "Error: No such image: nope:latest");
        assert!(result.display.contains("docker rmi -f nope:latest"));
        assert!(result.display.contains("Error: No such image: nope:latest"));
        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn signal_death_counts_as_failure() {
        let mock = MockInvoker::new();
        mock.push_response(ProcessOutput {
            success: false,
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        });

        let result = run_command(&mock, &argv(&["docker", "ps"])).await.unwrap();
        assert_eq!(result.output, "");
        assert_eq!(result.display, "❌ Command failed: docker ps\n");
    }

    #[tokio::test]
    async fn exactly_one_invocation_per_call() {
        let mock = MockInvoker::new();
        run_command(&mock, &argv(&["docker", "images"])).await.unwrap();
        assert_eq!(mock.calls(), vec![argv(&["docker", "images"])]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_process_failure_framing() {
        let cmd = argv(&["sh", "-c", "echo boom >&2; exit 1"]);
        let result = run_command(&crate::SystemInvoker, &cmd).await.unwrap();
        assert_eq!(result.output, "boom");
        assert_eq!(
            result.display,
            "❌ Command failed: sh -c echo boom >&2; exit 1\nboom"
        );
    }
}
