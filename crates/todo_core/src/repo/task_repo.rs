//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist tasks together with their categories.
//! - Serve predicate queries and category lookups.
//!
//! # Invariants
//! - `insert_tasks` runs in a single transaction.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::category::{Category, CategoryId};
use crate::model::task::{Task, TaskId};
use crate::model::TaskValidationError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    t.id AS task_id,
    t.title,
    t.due_date,
    t.done,
    t.completed_on,
    c.id AS category_id,
    c.description
FROM tasks t
JOIN categories c ON c.id = t.category_id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Lazy sequence of tasks returned by [`TaskRepository::query_tasks`].
pub type TaskIter<'a> = Box<dyn Iterator<Item = Task> + 'a>;

/// Persistence failure raised by a repository backend.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    InvalidData(String),
    /// The write contradicts stored identities (taken task id, category id
    /// bound to another description, description bound to another id).
    Conflict(String),
    /// Backend-specific failure that has no richer representation.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::Conflict(message) => write!(f, "conflicting write: {message}"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Conflict(_) | Self::Backend(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage capability every command handler depends on.
pub trait TaskRepository {
    /// Stores all `tasks` or none of them.
    ///
    /// Categories without an id are matched by description and created when
    /// missing. A category with an id must either match the stored
    /// `(id, description)` pair or be new on both keys; a task with an id
    /// must not already exist. Violations fail with `RepoError::Conflict`.
    fn insert_tasks(&self, tasks: &[Task]) -> RepoResult<()>;

    /// Returns the stored tasks matching `predicate`.
    ///
    /// The iterator is finite and applies `predicate` lazily; every call
    /// starts a new sequence. Backends may load the stored rows eagerly
    /// before the iterator is returned.
    fn query_tasks<'a, P>(&'a self, predicate: P) -> RepoResult<TaskIter<'a>>
    where
        P: Fn(&Task) -> bool + 'a;

    fn get_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>>;
}

impl<R: TaskRepository> TaskRepository for &R {
    fn insert_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        (**self).insert_tasks(tasks)
    }

    fn query_tasks<'a, P>(&'a self, predicate: P) -> RepoResult<TaskIter<'a>>
    where
        P: Fn(&Task) -> bool + 'a,
    {
        (**self).query_tasks(predicate)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        (**self).get_category_by_id(id)
    }
}

/// SQLite-backed task repository.
///
/// Borrows a connection returned by [`crate::db::open_db`] or
/// [`crate::db::open_db_in_memory`], so the schema is already migrated.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        for task in tasks {
            task.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        for task in tasks {
            if let Some(id) = task.id {
                ensure_task_id_free(&tx, id)?;
            }
            let category_id = resolve_category_id(&tx, &task.category)?;
            tx.execute(
                "INSERT INTO tasks (
                    id,
                    title,
                    category_id,
                    due_date,
                    done,
                    completed_on
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    task.id,
                    task.title.as_str(),
                    category_id,
                    task.due_date,
                    bool_to_int(task.done),
                    task.completed_on,
                ],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    // Rows are decoded up front so the statement can be dropped; filtering
    // stays lazy.
    fn query_tasks<'a, P>(&'a self, predicate: P) -> RepoResult<TaskIter<'a>>
    where
        P: Fn(&Task) -> bool + 'a,
    {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY t.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(Box::new(tasks.into_iter().filter(move |task| predicate(task))))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, description FROM categories WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let category = Category::with_id(row.get("id")?, row.get::<_, String>("description")?);
            category.validate()?;
            return Ok(Some(category));
        }

        Ok(None)
    }
}

fn resolve_category_id(conn: &Connection, category: &Category) -> RepoResult<CategoryId> {
    let description = category.description.as_str();
    let Some(id) = category.id else {
        if let Some(id) = find_category_id(conn, description)? {
            return Ok(id);
        }
        conn.execute(
            "INSERT INTO categories (description) VALUES (?1);",
            [description],
        )?;
        return Ok(conn.last_insert_rowid());
    };

    let stored: Option<String> = conn
        .query_row(
            "SELECT description FROM categories WHERE id = ?1;",
            [id],
            |row| row.get(0),
        )
        .optional()?;
    match stored {
        Some(stored) if stored == description => Ok(id),
        Some(stored) => Err(RepoError::Conflict(format!(
            "category {id} is stored as `{stored}`, not `{description}`"
        ))),
        None => {
            if let Some(other) = find_category_id(conn, description)? {
                return Err(RepoError::Conflict(format!(
                    "category `{description}` is stored under id {other}, not {id}"
                )));
            }
            conn.execute(
                "INSERT INTO categories (id, description) VALUES (?1, ?2);",
                params![id, description],
            )?;
            Ok(id)
        }
    }
}

fn find_category_id(conn: &Connection, description: &str) -> RepoResult<Option<CategoryId>> {
    let id = conn
        .query_row(
            "SELECT id FROM categories WHERE description = ?1;",
            [description],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn ensure_task_id_free(conn: &Connection, id: TaskId) -> RepoResult<()> {
    let taken: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    if taken == 1 {
        return Err(RepoError::Conflict(format!("task id {id} already exists")));
    }
    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task_id: i64 = row.get("task_id")?;
    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in tasks.done for task {task_id}"
            )));
        }
    };

    let task = Task {
        id: Some(task_id),
        title: row.get("title")?,
        category: Category::with_id(row.get("category_id")?, row.get::<_, String>("description")?),
        due_date: row.get("due_date")?,
        done,
        completed_on: row.get("completed_on")?,
    };
    task.validate().map_err(|err| {
        RepoError::InvalidData(format!("task {task_id} violates model invariants: {err}"))
    })?;
    Ok(task)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
