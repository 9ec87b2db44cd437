use thiserror::Error;

use crate::shell::CommandOutput;

/// Failures surfaced by task bodies and the capabilities handed to them.
///
/// A missing task is not an error (the registry prints the listing and
/// moves on); everything here is a real failure that propagates to the
/// process boundary.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A command ran and exited non-zero (or died to a signal). Carries
    /// everything the command produced.
    #[error("command failed with status {}: {}", .0.status, .0.command)]
    CommandFailed(CommandOutput),

    /// A command could not be started at all.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command string had no program in it.
    #[error("empty command")]
    EmptyCommand,

    /// The scheduled run was torn down before it could publish an outcome.
    #[error("task run aborted before completion")]
    Aborted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Free-form failure raised by a task body.
    #[error("{0}")]
    Message(String),
}

impl TaskError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Process exit status for this failure.
    ///
    /// A failed command passes its child's status through; everything else
    /// (including signal deaths, which have no status) maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskError::CommandFailed(output) if output.status > 0 => output.status,
            _ => 1,
        }
    }
}
