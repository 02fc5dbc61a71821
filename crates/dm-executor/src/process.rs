//! Process invokers: spawn one child process and collect its output.

use crate::ExecutorError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::process::Stdio;
use std::sync::{Mutex, PoisonError};

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// True only for a zero exit status.
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Seam between the tools and the operating system.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Run `argv[0]` with the remaining elements as arguments and wait for it.
    async fn invoke(&self, argv: &[String]) -> Result<ProcessOutput, ExecutorError>;
}

/// Real invoker backed by `tokio::process`.
///
/// The child inherits the environment, reads from the null device and has
/// both output streams captured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemInvoker;

#[async_trait]
impl Invoker for SystemInvoker {
    async fn invoke(&self, argv: &[String]) -> Result<ProcessOutput, ExecutorError> {
        let (program, args) = argv.split_first().ok_or(ExecutorError::EmptyCommand)?;

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ExecutorError::Process(format!("failed to run {program}: {e}")))?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Scripted invoker for tests: records every argument vector and replays
/// queued outputs in order. An empty queue yields a silent success.
#[derive(Debug, Default)]
pub struct MockInvoker {
    responses: Mutex<VecDeque<ProcessOutput>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output for the next invocation.
    pub fn push_response(&self, output: ProcessOutput) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(output);
    }

    /// Every argument vector seen so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_call(&self) -> Option<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl Invoker for MockInvoker {
    async fn invoke(&self, argv: &[String]) -> Result<ProcessOutput, ExecutorError> {
        if argv.is_empty() {
            return Err(ExecutorError::EmptyCommand);
        }
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(argv.to_vec());
        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        Ok(next.unwrap_or_else(|| ProcessOutput::ok("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_invoker_captures_both_streams() {
        let out = SystemInvoker
            .invoke(&argv(&["sh", "-c", "echo out; echo err >&2"]))
            .await
            .unwrap();
        assert!(out.success);
        assert_eq!(out.code, Some(0));
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_invoker_reports_nonzero_exit() {
        let out = SystemInvoker
            .invoke(&argv(&["sh", "-c", "echo nope >&2; exit 3"]))
            .await
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stderr, "nope\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn system_invoker_does_not_pipe_stdin() {
        // `cat` on the null device sees EOF immediately instead of blocking.
        let out = SystemInvoker.invoke(&argv(&["cat"])).await.unwrap();
        assert!(out.success);
        assert_eq!(out.stdout, "");
    }

    #[tokio::test]
    async fn system_invoker_missing_binary_is_process_error() {
        let err = SystemInvoker
            .invoke(&argv(&["dm-executor-definitely-not-a-binary"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutorError::Process(_)));
    }

    #[tokio::test]
    async fn empty_argv_is_rejected() {
        let err = SystemInvoker.invoke(&[]).await.unwrap_err();
        assert!(matches!(err, ExecutorError::EmptyCommand));

        let err = MockInvoker::new().invoke(&[]).await.unwrap_err();
        assert!(matches!(err, ExecutorError::EmptyCommand));
    }

    #[tokio::test]
    async fn mock_replays_in_order_then_defaults() {
        let mock = MockInvoker::new();
        mock.push_response(ProcessOutput::ok("first"));
        mock.push_response(ProcessOutput::failed(1, "second"));

        let a = mock.invoke(&argv(&["docker", "a"])).await.unwrap();
        let b = mock.invoke(&argv(&["docker", "b"])).await.unwrap();
        let c = mock.invoke(&argv(&["docker", "c"])).await.unwrap();

        assert_eq!(a.stdout, "first");
        assert!(!b.success);
        assert_eq!(c, ProcessOutput::ok(""));
        assert_eq!(mock.calls().len(), 3);
        assert_eq!(mock.last_call().unwrap(), argv(&["docker", "c"]));
    }
}
