use crate::model::TaskValidationError;
use crate::repo::task_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a command did not complete.
#[derive(Debug)]
pub enum CommandFailure {
    /// The command was rejected before any repository call.
    Validation(TaskValidationError),
    /// The repository returned an error.
    Persistence(RepoError),
}

impl Display for CommandFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid command: {err}"),
            Self::Persistence(err) => write!(f, "persistence failed: {err}"),
        }
    }
}

impl Error for CommandFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

/// Outcome of one handler invocation.
///
/// `T` is the value a successful command produces; registration commands
/// produce `()`.
#[derive(Debug)]
pub enum CommandResult<T = ()> {
    Success {
        value: T,
        messages: Vec<String>,
    },
    Failure {
        failure: CommandFailure,
        messages: Vec<String>,
    },
}

impl<T> CommandResult<T> {
    pub fn success(value: T, message: impl Into<String>) -> Self {
        Self::Success {
            value,
            messages: vec![message.into()],
        }
    }

    pub fn failure(failure: CommandFailure, message: impl Into<String>) -> Self {
        Self::Failure {
            failure,
            messages: vec![message.into()],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Human-readable messages in the order they were produced.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Success { messages, .. } | Self::Failure { messages, .. } => messages,
        }
    }

    pub fn failure_detail(&self) -> Option<&CommandFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { failure, .. } => Some(failure),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Converts into a plain `Result`, dropping the messages.
    pub fn into_result(self) -> Result<T, CommandFailure> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure { failure, .. } => Err(failure),
        }
    }
}
