//! Task registration core.
//!
//! Commands describe what a caller wants, handlers execute them against a
//! `TaskRepository`, and every outcome comes back as a `CommandResult`.

pub mod command;
pub mod config;
pub mod db;
pub mod handler;
pub mod log_port;
pub mod logging;
pub mod model;
pub mod repo;
pub mod testing;

pub use command::{CommandFailure, CommandResult, GetCategoryById, RegisterTask};
pub use config::CoreConfig;
pub use handler::get_category::GetCategoryByIdHandler;
pub use handler::register_task::{RegisterTaskHandler, PERSISTING_TASK_MARKER};
pub use log_port::{CoreLogSink, LogLevel, LogSink};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::task::{Task, TaskId};
pub use model::TaskValidationError;
pub use repo::memory_repo::InMemoryTaskRepository;
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskIter, TaskRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
