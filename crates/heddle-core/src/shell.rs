//! Command execution handed to task bodies.

use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::TaskError;

/// How a spawned command's stdio is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Stream through the parent's terminal. The default for tasks.
    #[default]
    Inherit,
    /// Pipe and capture stdout/stderr.
    Capture,
}

/// Runs command strings for tasks.
///
/// The string is split on whitespace into program and arguments; no shell
/// is involved, so quoting and expansion are up to the caller.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    mode: StdioMode,
}

impl Shell {
    pub fn new(mode: StdioMode) -> Self {
        Self { mode }
    }

    /// Commands stream to the parent's stdio.
    pub fn inherit() -> Self {
        Self::new(StdioMode::Inherit)
    }

    /// Commands run silently with their output captured.
    pub fn capture() -> Self {
        Self::new(StdioMode::Capture)
    }

    /// Run a command to completion. A non-zero exit is an error carrying
    /// the full [`CommandOutput`].
    pub async fn run(&self, command: &str) -> Result<CommandOutput, TaskError> {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(TaskError::EmptyCommand);
        };

        let mut child = Command::new(program);
        child.args(parts);

        let spawn_err = |source| TaskError::Spawn {
            command: command.to_string(),
            source,
        };

        let output = match self.mode {
            StdioMode::Inherit => {
                let status = child.status().await.map_err(spawn_err)?;
                CommandOutput {
                    command: command.to_string(),
                    status: status.code().unwrap_or(-1),
                    stdout: String::new(),
                    stderr: String::new(),
                }
            }
            StdioMode::Capture => {
                child.stdin(Stdio::null());
                let raw = child.output().await.map_err(spawn_err)?;
                CommandOutput {
                    command: command.to_string(),
                    status: raw.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&raw.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&raw.stderr).into_owned(),
                }
            }
        };

        if output.success() {
            Ok(output)
        } else {
            Err(TaskError::CommandFailed(output))
        }
    }

    /// Run a command and always come back with an output. Status failures
    /// return what the command produced; a failed spawn synthesizes status
    /// 127 with the error text on stderr.
    pub async fn safe(&self, command: &str) -> CommandOutput {
        match self.run(command).await {
            Ok(output) => output,
            Err(TaskError::CommandFailed(output)) => output,
            Err(err) => CommandOutput {
                command: command.to_string(),
                status: 127,
                stdout: String::new(),
                stderr: err.to_string(),
            },
        }
    }
}

/// What a finished command looked like.
///
/// `stdout`/`stderr` are empty in inherit mode (the bytes went to the
/// terminal, not to us). Invalid UTF-8 in captured output is replaced,
/// not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub command: String,
    /// Exit status; -1 when the process died to a signal.
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_of_a_successful_command() {
        let output = Shell::capture().run("echo one two").await.unwrap();
        assert_eq!(output.status, 0);
        assert!(output.success());
        assert_eq!(output.stdout, "one two\n");
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error_carrying_the_output() {
        let err = Shell::capture().run("false").await.unwrap_err();
        match err {
            TaskError::CommandFailed(output) => {
                assert_eq!(output.command, "false");
                assert_eq!(output.status, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let err = Shell::capture().run("   ").await.unwrap_err();
        assert!(matches!(err, TaskError::EmptyCommand));
    }

    #[tokio::test]
    async fn safe_swallows_status_failures() {
        let output = Shell::capture().safe("false").await;
        assert_eq!(output.status, 1);
    }

    #[tokio::test]
    async fn safe_synthesizes_127_for_unspawnable_commands() {
        let output = Shell::capture().safe("definitely-not-a-real-binary-a6f0").await;
        assert_eq!(output.status, 127);
        assert!(output.stderr.contains("definitely-not-a-real-binary-a6f0"));
    }
}
