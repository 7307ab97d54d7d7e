use crate::model::category::Category;
use crate::model::task::Task;
use crate::model::TaskValidationError;
use chrono::NaiveDate;

/// Request to register one new task.
///
/// Fields are private so the command cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTask {
    title: String,
    category: Category,
    due_date: NaiveDate,
}

impl RegisterTask {
    pub fn new(title: impl Into<String>, category: Category, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            category,
            due_date,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Applies the task invariants that concern command fields.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        self.category.validate()
    }

    /// Builds the open, unpersisted task this command describes.
    pub fn to_task(&self) -> Task {
        Task::new(self.title.clone(), self.category.clone(), self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::RegisterTask;
    use crate::model::category::Category;
    use crate::model::TaskValidationError;
    use chrono::NaiveDate;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()
    }

    #[test]
    fn to_task_copies_command_fields() {
        let command = RegisterTask::new("Estudar Xunit", Category::new("Estudo"), due());
        let task = command.to_task();

        assert_eq!(task.id, None);
        assert_eq!(task.title, "Estudar Xunit");
        assert_eq!(task.category, Category::new("Estudo"));
        assert_eq!(task.due_date, due());
        assert!(!task.done);
        assert_eq!(task.completed_on, None);
    }

    #[test]
    fn validate_reports_title_before_category() {
        let command = RegisterTask::new(" ", Category::new(""), due());
        assert_eq!(command.validate(), Err(TaskValidationError::EmptyTitle));

        let command = RegisterTask::new("ok", Category::new(""), due());
        assert_eq!(
            command.validate(),
            Err(TaskValidationError::EmptyCategoryDescription)
        );
    }
}
