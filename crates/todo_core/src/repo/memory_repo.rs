//! In-memory task repository.
//!
//! # Responsibility
//! - Provide a deterministic, storage-free `TaskRepository` for tests and
//!   embedding callers.
//! - Enforce the same identity rules as the SQLite store.
//!
//! # Invariants
//! - Ids are assigned sequentially starting at 1, separately for tasks and
//!   categories; once `i64::MAX` is used, new ids are refused.
//! - A batch is applied to a staged copy and published only when every task
//!   was accepted, so callers never observe a partial batch.

use crate::model::category::{Category, CategoryId};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskIter, TaskRepository};
use std::sync::{Mutex, MutexGuard};

/// `TaskRepository` that keeps everything in process memory.
#[derive(Debug)]
pub struct InMemoryTaskRepository {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Clone)]
struct MemoryState {
    tasks: Vec<Task>,
    categories: Vec<Category>,
    /// `None` once the id space is exhausted.
    next_task_id: Option<TaskId>,
    next_category_id: Option<CategoryId>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tasks: Vec::new(),
                categories: Vec::new(),
                next_task_id: Some(1),
                next_category_id: Some(1),
            }),
        }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| RepoError::Backend("in-memory task store lock poisoned".to_string()))
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Next free id after `used` has been taken.
fn advance_after(next: Option<i64>, used: i64) -> Option<i64> {
    match next {
        Some(next) if next > used => Some(next),
        Some(_) => used.checked_add(1),
        None => None,
    }
}

fn allocate(next: &mut Option<i64>, kind: &str) -> RepoResult<i64> {
    let id = next.ok_or_else(|| RepoError::Backend(format!("{kind} id space exhausted")))?;
    *next = id.checked_add(1);
    Ok(id)
}

impl MemoryState {
    fn resolve_category(&mut self, category: &Category) -> RepoResult<Category> {
        let description = category.description.as_str();
        let by_description = self
            .categories
            .iter()
            .find(|stored| stored.description == description);

        let Some(id) = category.id else {
            if let Some(existing) = by_description {
                return Ok(existing.clone());
            }
            let id = allocate(&mut self.next_category_id, "category")?;
            let stored = Category::with_id(id, description);
            self.categories.push(stored.clone());
            return Ok(stored);
        };

        if let Some(stored) = self.categories.iter().find(|stored| stored.id == Some(id)) {
            if stored.description != description {
                return Err(RepoError::Conflict(format!(
                    "category {id} is stored as `{}`, not `{description}`",
                    stored.description
                )));
            }
            return Ok(stored.clone());
        }
        if let Some(other) = by_description {
            return Err(RepoError::Conflict(format!(
                "category `{description}` is stored under id {}, not {id}",
                other.id.map_or_else(|| "?".to_string(), |other| other.to_string())
            )));
        }

        self.next_category_id = advance_after(self.next_category_id, id);
        self.categories.push(category.clone());
        Ok(category.clone())
    }

    fn store_task(&mut self, task: &Task) -> RepoResult<()> {
        let id = match task.id {
            Some(id) => {
                if self.tasks.iter().any(|stored| stored.id == Some(id)) {
                    return Err(RepoError::Conflict(format!("task id {id} already exists")));
                }
                self.next_task_id = advance_after(self.next_task_id, id);
                id
            }
            None => allocate(&mut self.next_task_id, "task")?,
        };

        let mut stored = task.clone();
        stored.id = Some(id);
        stored.category = self.resolve_category(&task.category)?;
        self.tasks.push(stored);
        Ok(())
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn insert_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        for task in tasks {
            task.validate()?;
        }

        let mut state = self.lock()?;
        let mut staged = state.clone();
        for task in tasks {
            staged.store_task(task)?;
        }
        *state = staged;
        Ok(())
    }

    fn query_tasks<'a, P>(&'a self, predicate: P) -> RepoResult<TaskIter<'a>>
    where
        P: Fn(&Task) -> bool + 'a,
    {
        let snapshot = self.lock()?.tasks.clone();
        Ok(Box::new(snapshot.into_iter().filter(move |task| predicate(task))))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let state = self.lock()?;
        Ok(state
            .categories
            .iter()
            .find(|category| category.id == Some(id))
            .cloned())
    }
}
