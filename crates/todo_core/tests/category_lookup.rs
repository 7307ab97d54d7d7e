use chrono::NaiveDate;
use todo_core::db::open_db_in_memory;
use todo_core::testing::{RecordingLogSink, ScriptedTaskRepository};
use todo_core::{
    Category, CommandFailure, GetCategoryById, GetCategoryByIdHandler, LogLevel, RepoError,
    SqliteTaskRepository, Task, TaskRepository,
};

#[test]
fn lookup_calls_repository_once_with_requested_id() {
    let repo = ScriptedTaskRepository::new();
    let handler = GetCategoryByIdHandler::new(&repo, RecordingLogSink::new());

    handler.execute(&GetCategoryById::new(20));

    assert_eq!(repo.category_lookups(), vec![20]);
}

#[test]
fn unknown_id_is_a_successful_empty_lookup() {
    let repo = ScriptedTaskRepository::new();
    let sink = RecordingLogSink::new();
    let handler = GetCategoryByIdHandler::new(&repo, &sink);

    let result = handler.execute(&GetCategoryById::new(20));

    assert!(result.is_success());
    assert_eq!(result.value(), Some(&None));
    assert!(sink.events().is_empty());
}

#[test]
fn stored_category_is_returned() {
    let repo = ScriptedTaskRepository::new();
    let due = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
    repo.insert_tasks(&[Task::new("t", Category::with_id(100, "Estudo"), due)])
        .unwrap();
    let handler = GetCategoryByIdHandler::new(&repo, RecordingLogSink::new());

    let category = handler
        .execute(&GetCategoryById::new(100))
        .into_result()
        .unwrap()
        .unwrap();

    assert_eq!(category.description, "Estudo");
}

#[test]
fn storage_error_is_logged_and_returned_as_failure() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE tasks; DROP TABLE categories;")
        .unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let sink = RecordingLogSink::new();
    let handler = GetCategoryByIdHandler::new(&repo, &sink);

    let result = handler.execute(&GetCategoryById::new(1));

    assert!(!result.is_success());
    assert!(matches!(
        result.failure_detail(),
        Some(CommandFailure::Persistence(RepoError::Db(_)))
    ));
    let errors = sink.events_at(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].failure.is_some());
}
