//! Category domain model.
//!
//! # Invariants
//! - `description` is non-empty after trimming.
//! - `id` is assigned by a repository on first insert and never changed
//!   afterwards.

use super::TaskValidationError;
use serde::{Deserialize, Serialize};

/// Repository-assigned category identifier.
pub type CategoryId = i64;

/// Grouping label shared by many tasks.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Category {
    /// `None` until the category has been persisted.
    pub id: Option<CategoryId>,
    pub description: String,
}

impl Category {
    /// Creates an unpersisted category.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }

    /// Creates a category that already carries a stable identifier.
    pub fn with_id(id: CategoryId, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            description: description.into(),
        }
    }

    /// Checks the category invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.description.trim().is_empty() {
            return Err(TaskValidationError::EmptyCategoryDescription);
        }
        Ok(())
    }
}

/// Identity comparison: ids when both are set, descriptions when both are
/// unset. A persisted category never equals an unpersisted one.
impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            (None, None) => self.description == other.description,
            _ => false,
        }
    }
}
