//! Test doubles for handler collaborators.
//!
//! # Responsibility
//! - Record what handlers send to their repository and log sink.
//! - Let tests script repository failures without a real store.
//!
//! # Invariants
//! - Doubles never panic on use; recorded state is behind a mutex so they
//!   can be shared by reference with the handler under test.

use crate::log_port::{LogLevel, LogSink};
use crate::model::category::{Category, CategoryId};
use crate::model::task::Task;
use crate::repo::memory_repo::InMemoryTaskRepository;
use crate::repo::task_repo::{RepoError, RepoResult, TaskIter, TaskRepository};
use std::error::Error;
use std::sync::Mutex;

/// One event captured by [`RecordingLogSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEvent {
    pub level: LogLevel,
    pub message: String,
    /// `Display` of the attached failure.
    pub failure: Option<String>,
    /// `Debug` of the attached failure, to identify the exact error value.
    pub failure_debug: Option<String>,
}

/// `LogSink` that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingLogSink {
    events: Mutex<Vec<LoggedEvent>>,
}

impl RecordingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events in emission order.
    pub fn events(&self) -> Vec<LoggedEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn events_at(&self, level: LogLevel) -> Vec<LoggedEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.level == level)
            .collect()
    }

    /// All messages concatenated, for substring assertions.
    pub fn output(&self) -> String {
        self.events()
            .into_iter()
            .map(|event| event.message)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LogSink for RecordingLogSink {
    fn log(&self, level: LogLevel, message: &str, failure: Option<&(dyn Error + 'static)>) {
        let event = LoggedEvent {
            level,
            message: message.to_string(),
            failure: failure.map(|err| err.to_string()),
            failure_debug: failure.map(|err| format!("{err:?}")),
        };
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event);
    }
}

/// Repository spy with a scriptable insert failure.
///
/// Successful calls are delegated to an inner [`InMemoryTaskRepository`], so
/// a spy that never fails behaves like a working store.
#[derive(Debug, Default)]
pub struct ScriptedTaskRepository {
    inner: InMemoryTaskRepository,
    insert_failure: Option<String>,
    inserted_batches: Mutex<Vec<Vec<Task>>>,
    category_lookups: Mutex<Vec<CategoryId>>,
}

impl ScriptedTaskRepository {
    /// Spy that forwards every call to an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spy whose `insert_tasks` always fails with
    /// `RepoError::Backend(message)`.
    pub fn failing_inserts(message: impl Into<String>) -> Self {
        Self {
            insert_failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// The error a failing spy returns, for comparing against logged events.
    pub fn scripted_error(&self) -> Option<RepoError> {
        self.insert_failure
            .as_ref()
            .map(|message| RepoError::Backend(message.clone()))
    }

    /// Every batch passed to `insert_tasks`, including failed ones.
    pub fn inserted_batches(&self) -> Vec<Vec<Task>> {
        match self.inserted_batches.lock() {
            Ok(batches) => batches.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn insert_calls(&self) -> usize {
        self.inserted_batches().len()
    }

    /// Every id passed to `get_category_by_id`.
    pub fn category_lookups(&self) -> Vec<CategoryId> {
        match self.category_lookups.lock() {
            Ok(lookups) => lookups.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TaskRepository for ScriptedTaskRepository {
    fn insert_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        match self.inserted_batches.lock() {
            Ok(mut batches) => batches.push(tasks.to_vec()),
            Err(poisoned) => poisoned.into_inner().push(tasks.to_vec()),
        }

        if let Some(err) = self.scripted_error() {
            return Err(err);
        }
        self.inner.insert_tasks(tasks)
    }

    fn query_tasks<'a, P>(&'a self, predicate: P) -> RepoResult<TaskIter<'a>>
    where
        P: Fn(&Task) -> bool + 'a,
    {
        self.inner.query_tasks(predicate)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        match self.category_lookups.lock() {
            Ok(mut lookups) => lookups.push(id),
            Err(poisoned) => poisoned.into_inner().push(id),
        }
        self.inner.get_category_by_id(id)
    }
}
