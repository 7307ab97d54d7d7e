//! Domain model for task registration.
//!
//! # Responsibility
//! - Define the `Category` and `Task` records handled by commands and
//!   repositories.
//! - Own the validation rules every write path must enforce.
//!
//! # Invariants
//! - Identifiers are unset until a repository persists the record.
//! - Titles and category descriptions are never blank.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category;
pub mod task;

/// Domain invariant violations for categories and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task title is empty or whitespace only.
    EmptyTitle,
    /// Category description is empty or whitespace only.
    EmptyCategoryDescription,
    /// `completed_on` is set on a task that is not marked done.
    CompletionWithoutDone,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::EmptyCategoryDescription => {
                write!(f, "category description cannot be empty")
            }
            Self::CompletionWithoutDone => {
                write!(f, "completion date requires the task to be done")
            }
        }
    }
}

impl Error for TaskValidationError {}
