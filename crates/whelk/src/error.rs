//! Error type for shell operations.

use std::io;

use thiserror::Error;

/// Errors that can occur while executing a command.
///
/// This is the closed set of failure kinds the shell distinguishes. None
/// of them escape to callers of [`Shell::execute`](crate::Shell::execute);
/// each is rendered into output text at that boundary.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A path named by the command does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The operating system refused the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// The command was recognized but an argument was unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The suggestion service could not be reached or returned a failure.
    #[error("suggestion service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Input matched no command and no phrase pattern.
    #[error("command not recognized: {0}")]
    Unrecognized(String),
    /// Any other IO failure, surfaced with the operating system's message.
    #[error("{0}")]
    Io(io::Error),
}

impl ShellError {
    /// Classify an IO error against `path`, keeping the OS message for
    /// kinds the shell does not name.
    pub(crate) fn from_io(err: io::Error, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_string()),
            _ => Self::Io(err),
        }
    }
}
