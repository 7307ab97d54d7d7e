//! Task registration handler.
//!
//! # Responsibility
//! - Validate a `RegisterTask` command and persist the task it describes.
//! - Report the outcome as a `CommandResult` and as log events.
//!
//! # Invariants
//! - Invalid commands never reach the repository.
//! - One Debug event precedes every persistence attempt.
//! - Every repository error yields exactly one Error event carrying that
//!   error, and a failed result.

use crate::command::{CommandFailure, CommandResult, RegisterTask};
use crate::log_port::{LogLevel, LogSink};
use crate::repo::task_repo::TaskRepository;

/// Prefix of the Debug event emitted before a task is written.
pub const PERSISTING_TASK_MARKER: &str = "Persisting the task";

/// Handles [`RegisterTask`] commands.
pub struct RegisterTaskHandler<R: TaskRepository, L: LogSink> {
    repo: R,
    log: L,
}

impl<R: TaskRepository, L: LogSink> RegisterTaskHandler<R, L> {
    pub fn new(repo: R, log: L) -> Self {
        Self { repo, log }
    }

    /// Registers the task described by `command`.
    ///
    /// # Contract
    /// - `Success` only after `insert_tasks` returned `Ok`.
    /// - `Failure(Validation)` without a repository call for invalid input.
    /// - `Failure(Persistence)` for any repository error; nothing is raised.
    pub fn execute(&self, command: &RegisterTask) -> CommandResult {
        if let Err(err) = command.validate() {
            let message = format!("Rejected task `{}`: {err}", command.title());
            self.log.log(LogLevel::Error, &message, Some(&err));
            return CommandResult::failure(CommandFailure::Validation(err), message);
        }

        let task = command.to_task();
        self.log.log(
            LogLevel::Debug,
            &format!("{PERSISTING_TASK_MARKER} `{}`", task.title),
            None,
        );

        match self.repo.insert_tasks(std::slice::from_ref(&task)) {
            Ok(()) => CommandResult::success((), format!("Task `{}` registered.", task.title)),
            Err(err) => {
                let message = format!("Failed to register task `{}`: {err}", task.title);
                self.log.log(LogLevel::Error, &message, Some(&err));
                CommandResult::failure(CommandFailure::Persistence(err), message)
            }
        }
    }
}
