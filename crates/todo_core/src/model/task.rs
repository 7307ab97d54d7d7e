//! Task domain model.
//!
//! # Responsibility
//! - Define the unit of work registered through commands.
//!
//! # Invariants
//! - `title` is non-empty after trimming.
//! - `category` must itself be valid.
//! - `completed_on` is only set when `done` is true.
//!
//! # See also
//! - `crate::command::RegisterTask`

use super::category::Category;
use super::TaskValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Repository-assigned task identifier.
pub type TaskId = i64;

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `None` until the task has been persisted.
    pub id: Option<TaskId>,
    pub title: String,
    pub category: Category,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub due_date: NaiveDate,
    pub done: bool,
    /// Day the task was completed. Meaningful only when `done` is true.
    pub completed_on: Option<NaiveDate>,
}

impl Task {
    /// Creates an open, unpersisted task.
    ///
    /// Does not validate; write paths call [`Task::validate`].
    pub fn new(title: impl Into<String>, category: Category, due_date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            category,
            due_date,
            done: false,
            completed_on: None,
        }
    }

    /// Checks the task invariants, including its category.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        self.category.validate()?;
        if self.completed_on.is_some() && !self.done {
            return Err(TaskValidationError::CompletionWithoutDone);
        }
        Ok(())
    }
}
