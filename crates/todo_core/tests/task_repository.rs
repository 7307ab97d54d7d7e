use chrono::NaiveDate;
use todo_core::db::{open_db, open_db_in_memory};
use todo_core::{Category, RepoError, SqliteTaskRepository, Task, TaskRepository};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn count_rows(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn insert_and_query_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut finished = Task::new("Revisar PR", Category::new("Trabalho"), date(2020, 1, 10));
    finished.done = true;
    finished.completed_on = Some(date(2020, 1, 9));
    repo.insert_tasks(&[
        Task::new("Estudar Xunit", Category::new("Estudo"), date(2019, 12, 31)),
        finished,
    ])
    .unwrap();

    let all: Vec<Task> = repo.query_tasks(|_| true).unwrap().collect();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Estudar Xunit");
    assert_eq!(all[0].due_date, date(2019, 12, 31));
    assert_eq!(all[0].category.description, "Estudo");
    assert!(all[1].done);
    assert_eq!(all[1].completed_on, Some(date(2020, 1, 9)));
}

#[test]
fn query_filters_and_restarts_per_call() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.insert_tasks(&[
        Task::new("a", Category::new("Estudo"), date(2019, 12, 1)),
        Task::new("b", Category::new("Casa"), date(2019, 12, 2)),
        Task::new("c", Category::new("Estudo"), date(2019, 12, 3)),
    ])
    .unwrap();

    let study = |task: &Task| task.category.description == "Estudo";
    assert_eq!(repo.query_tasks(study).unwrap().count(), 2);
    assert_eq!(repo.query_tasks(study).unwrap().count(), 2);
    assert_eq!(
        repo.query_tasks(|task| task.title == "missing")
            .unwrap()
            .count(),
        0
    );
}

#[test]
fn categories_are_shared_by_description() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.insert_tasks(&[Task::new("a", Category::new("Estudo"), date(2019, 12, 1))])
        .unwrap();
    repo.insert_tasks(&[Task::new("b", Category::new("Estudo"), date(2019, 12, 2))])
        .unwrap();

    assert_eq!(count_rows(&conn, "categories"), 1);
    let ids: Vec<_> = repo
        .query_tasks(|_| true)
        .unwrap()
        .map(|task| task.category.id)
        .collect();
    assert_eq!(ids[0], ids[1]);
}

#[test]
fn explicit_category_id_is_persisted_and_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.insert_tasks(&[Task::new(
        "Usar Moq",
        Category::with_id(100, "Estudo"),
        date(2019, 12, 31),
    )])
    .unwrap();

    let category = repo.get_category_by_id(100).unwrap().unwrap();
    assert_eq!(category, Category::with_id(100, "Estudo"));
    assert_eq!(category.description, "Estudo");
    assert!(repo.get_category_by_id(20).unwrap().is_none());
}

#[test]
fn validation_failure_stores_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo
        .insert_tasks(&[
            Task::new("valid", Category::new("Estudo"), date(2019, 12, 1)),
            Task::new("", Category::new("Estudo"), date(2019, 12, 2)),
        ])
        .unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(count_rows(&conn, "tasks"), 0);
    assert_eq!(count_rows(&conn, "categories"), 0);
}

#[test]
fn conflicting_category_rolls_back_the_whole_batch() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.insert_tasks(&[Task::new("seed", Category::with_id(1, "Estudo"), date(2019, 12, 1))])
        .unwrap();

    let err = repo
        .insert_tasks(&[
            Task::new("first", Category::new("Casa"), date(2019, 12, 2)),
            Task::new("second", Category::with_id(50, "Estudo"), date(2019, 12, 3)),
        ])
        .unwrap_err();

    assert!(matches!(err, RepoError::Conflict(_)));
    assert_eq!(count_rows(&conn, "tasks"), 1);
    assert_eq!(count_rows(&conn, "categories"), 1);
}

#[test]
fn explicit_category_id_with_another_description_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.insert_tasks(&[Task::new("seed", Category::new("Estudo"), date(2019, 12, 1))])
        .unwrap();

    let err = repo
        .insert_tasks(&[Task::new("renamed", Category::with_id(1, "Casa"), date(2019, 12, 2))])
        .unwrap_err();

    assert!(matches!(err, RepoError::Conflict(_)));
    assert!(err.to_string().contains("category 1 is stored as `Estudo`"));
    assert_eq!(
        repo.query_tasks(|task| task.category.description == "Casa")
            .unwrap()
            .count(),
        0
    );
    assert_eq!(
        repo.get_category_by_id(1).unwrap().unwrap().description,
        "Estudo"
    );
    assert_eq!(count_rows(&conn, "tasks"), 1);
}

#[test]
fn corrupted_rows_are_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.insert_tasks(&[Task::new("a", Category::new("Estudo"), date(2019, 12, 1))])
        .unwrap();
    conn.execute_batch("UPDATE tasks SET completed_on = '2019-12-02';")
        .unwrap();

    let err = repo.query_tasks(|_| true).err().unwrap();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn tasks_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        SqliteTaskRepository::new(&conn)
            .insert_tasks(&[Task::new("persisted", Category::new("Estudo"), date(2019, 12, 31))])
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let tasks: Vec<Task> = SqliteTaskRepository::new(&conn)
        .query_tasks(|_| true)
        .unwrap()
        .collect();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "persisted");
}
