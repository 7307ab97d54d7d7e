//! Category lookup handler.

use crate::command::{CommandFailure, CommandResult, GetCategoryById};
use crate::log_port::{LogLevel, LogSink};
use crate::model::category::Category;
use crate::repo::task_repo::TaskRepository;

/// Handles [`GetCategoryById`] commands.
///
/// A missing category is a successful lookup with value `None`.
pub struct GetCategoryByIdHandler<R: TaskRepository, L: LogSink> {
    repo: R,
    log: L,
}

impl<R: TaskRepository, L: LogSink> GetCategoryByIdHandler<R, L> {
    pub fn new(repo: R, log: L) -> Self {
        Self { repo, log }
    }

    pub fn execute(&self, command: &GetCategoryById) -> CommandResult<Option<Category>> {
        let id = command.id();
        match self.repo.get_category_by_id(id) {
            Ok(Some(category)) => CommandResult::success(
                Some(category),
                format!("Category {id} found."),
            ),
            Ok(None) => CommandResult::success(None, format!("Category {id} not found.")),
            Err(err) => {
                let message = format!("Failed to load category {id}: {err}");
                self.log.log(LogLevel::Error, &message, Some(&err));
                CommandResult::failure(CommandFailure::Persistence(err), message)
            }
        }
    }
}
