//! Task domain entity
//!
//! A task is a unit of work with a title, optional description, due date,
//! and a one-way completion state. All mutation goes through [`Task::update`]
//! and [`Task::complete`], which enforce the field invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryResponse;
use super::{DomainError, Patch};
use crate::validation::{FieldError, Validator};

const TITLE_MAX_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 500;

/// Task entity
///
/// Invariant: `title` is always non-empty and at most 50 characters after
/// trimming; `description`, when present, is at most 500 characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// 0 until the store assigns an identity on insert
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// User reference; 0 means unassigned
    pub assigned_to: i32,
    /// Category reference; 0 means uncategorized. Referential integrity is
    /// the store's concern, not the entity's.
    pub category_id: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<i32>,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_at: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Request-shape checks, accumulated per field
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let now = Utc::now();
        let mut v = Validator::new();
        v.ensure(!self.title.trim().is_empty(), "title", "Title is required")
            .ensure(
                self.title.trim().chars().count() <= TITLE_MAX_CHARS,
                "title",
                "Title cannot exceed 50 characters",
            )
            .ensure(
                self.description
                    .as_deref()
                    .map_or(true, |d| d.trim().chars().count() <= DESCRIPTION_MAX_CHARS),
                "description",
                "Description cannot exceed 500 characters",
            )
            .ensure(
                self.due_date.map_or(true, |d| d > now),
                "due_date",
                "Due date must be in the future",
            )
            .ensure(
                self.reminder_at.map_or(true, |r| r > now),
                "reminder_at",
                "Reminder date must be in the future",
            )
            .ensure(
                self.category_id.map_or(true, |id| id > 0),
                "category_id",
                "Category ID must be greater than 0",
            )
            .ensure(
                self.assigned_to.map_or(true, |id| id > 0),
                "assigned_to",
                "Assigned to ID must be greater than 0",
            );
        v.finish()
    }
}

/// Request body for partially updating a task.
///
/// Every field is presence-gated: only fields present in the request are
/// applied. Description accepts an explicit null to clear the stored value;
/// for the non-nullable fields a null is treated as not provided.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub assigned_to: Patch<i32>,
    #[serde(default)]
    pub category_id: Patch<i32>,
    #[serde(default)]
    pub due_date: Patch<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_at: Patch<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let now = Utc::now();
        let mut v = Validator::new();
        v.ensure(
            self.title
                .value()
                .map_or(true, |t| t.trim().chars().count() <= TITLE_MAX_CHARS),
            "title",
            "Title cannot exceed 50 characters",
        )
        .ensure(
            self.description
                .value()
                .map_or(true, |d| d.trim().chars().count() <= DESCRIPTION_MAX_CHARS),
            "description",
            "Description cannot exceed 500 characters",
        )
        .ensure(
            self.due_date.value().map_or(true, |d| *d > now),
            "due_date",
            "Due date must be in the future",
        )
        .ensure(
            self.reminder_at.value().map_or(true, |r| *r > now),
            "reminder_at",
            "Reminder date must be in the future",
        )
        .ensure(
            self.category_id.value().map_or(true, |id| *id > 0),
            "category_id",
            "Category ID must be greater than 0",
        )
        .ensure(
            self.assigned_to.value().map_or(true, |id| *id > 0),
            "assigned_to",
            "Assigned to ID must be greater than 0",
        );
        v.finish()
    }
}

impl Task {
    /// Create a new, not-yet-persisted task.
    ///
    /// Trims title and description, defaults `assigned_to` and `category_id`
    /// to 0 when absent, and copies the timestamps verbatim.
    pub fn create(request: CreateTaskRequest) -> Result<Self, DomainError> {
        let title = validated_title(&request.title)?;
        let description = match request.description.as_deref() {
            Some(d) => Some(validated_description(d)?),
            None => None,
        };

        Ok(Self {
            id: 0,
            title,
            description,
            assigned_to: request.assigned_to.unwrap_or(0),
            category_id: request.category_id.unwrap_or(0),
            due_date: request.due_date,
            reminder_at: request.reminder_at,
            is_completed: false,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Apply a partial update.
    ///
    /// `updated_at` is refreshed even when no field was provided.
    pub fn update(&mut self, request: UpdateTaskRequest) -> Result<(), DomainError> {
        if let Patch::Value(title) = &request.title {
            self.title = validated_title(title)?;
        }

        match request.description {
            Patch::Value(description) => {
                self.description = Some(validated_description(&description)?);
            }
            Patch::Null => self.description = None,
            Patch::Missing => {}
        }

        if let Patch::Value(assigned_to) = request.assigned_to {
            self.assigned_to = assigned_to;
        }

        if let Patch::Value(category_id) = request.category_id {
            self.category_id = category_id;
        }

        if let Patch::Value(due_date) = request.due_date {
            self.due_date = Some(due_date);
        }

        if let Patch::Value(reminder_at) = request.reminder_at {
            self.reminder_at = Some(reminder_at);
        }

        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Mark the task as completed. One-way: completing an already completed
    /// task is an invalid-state error.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.is_completed {
            return Err(DomainError::InvalidState("Task is already completed"));
        }

        let now = Utc::now();
        self.is_completed = true;
        self.completed_at = Some(now);
        self.updated_at = Some(now);
        Ok(())
    }

    /// A task is overdue when it has a due date, is not completed, and the
    /// current time is past the due date. Derived on read, never stored.
    pub fn is_overdue(&self) -> bool {
        self.due_date
            .is_some_and(|due| !self.is_completed && Utc::now() > due)
    }
}

fn validated_title(raw: &str) -> Result<String, DomainError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::invalid_argument(
            "title",
            "Title cannot be empty",
        ));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::invalid_argument(
            "title",
            "Title cannot exceed 50 characters",
        ));
    }
    Ok(title.to_string())
}

fn validated_description(raw: &str) -> Result<String, DomainError> {
    let description = raw.trim();
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(DomainError::invalid_argument(
            "description",
            "Description cannot exceed 500 characters",
        ));
    }
    Ok(description.to_string())
}

/// Response DTO for task
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: i32,
    pub category_id: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskResponse {
    pub fn from_entity(task: Task, category: Option<CategoryResponse>) -> Self {
        let is_overdue = task.is_overdue();
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            assigned_to: task.assigned_to,
            category_id: task.category_id,
            due_date: task.due_date,
            reminder_at: task.reminder_at,
            is_completed: task.is_completed,
            completed_at: task.completed_at,
            is_overdue,
            category,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: None,
            assigned_to: None,
            category_id: None,
            due_date: None,
            reminder_at: None,
        }
    }

    #[test]
    fn create_with_valid_request_sets_defaults() {
        let task = Task::create(CreateTaskRequest {
            title: "Test Task".to_string(),
            description: Some("Test Description".to_string()),
            assigned_to: None,
            category_id: Some(1),
            due_date: Some(Utc::now() + Duration::days(1)),
            reminder_at: None,
        })
        .unwrap();

        assert_eq!(task.title, "Test Task");
        assert_eq!(task.description.as_deref(), Some("Test Description"));
        assert_eq!(task.category_id, 1);
        assert_eq!(task.assigned_to, 0);
        assert!(!task.is_completed);
        assert!(task.completed_at.is_none());
        assert!(task.updated_at.is_none());
    }

    #[test]
    fn create_trims_title_and_description() {
        let task = Task::create(CreateTaskRequest {
            title: "  Buy groceries  ".to_string(),
            description: Some("  milk and bread  ".to_string()),
            ..create_request("")
        })
        .unwrap();

        assert_eq!(task.title, "Buy groceries");
        assert_eq!(task.description.as_deref(), Some("milk and bread"));
    }

    #[test]
    fn create_with_empty_title_fails() {
        let err = Task::create(create_request("")).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_argument("title", "Title cannot be empty")
        );
    }

    #[test]
    fn create_with_whitespace_title_fails() {
        let err = Task::create(create_request("   ")).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_argument("title", "Title cannot be empty")
        );
    }

    #[test]
    fn create_accepts_titles_up_to_fifty_chars() {
        let title = "t".repeat(50);
        let task = Task::create(create_request(&title)).unwrap();
        assert_eq!(task.title, title);
    }

    #[test]
    fn create_rejects_titles_over_fifty_chars() {
        let err = Task::create(create_request(&"t".repeat(51))).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_argument("title", "Title cannot exceed 50 characters")
        );
    }

    #[test]
    fn create_rejects_descriptions_over_five_hundred_chars() {
        let err = Task::create(CreateTaskRequest {
            description: Some("d".repeat(501)),
            ..create_request("Test Task")
        })
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_argument(
                "description",
                "Description cannot exceed 500 characters"
            )
        );
    }

    #[test]
    fn complete_marks_task_completed() {
        let mut task = Task::create(create_request("Test Task")).unwrap();

        task.complete().unwrap();

        assert!(task.is_completed);
        assert!(task.completed_at.is_some());
        assert!(task.updated_at.is_some());
    }

    #[test]
    fn complete_twice_fails_with_invalid_state() {
        let mut task = Task::create(create_request("Test Task")).unwrap();
        task.complete().unwrap();

        let err = task.complete().unwrap_err();
        assert_eq!(err, DomainError::InvalidState("Task is already completed"));
    }

    #[test]
    fn update_with_no_fields_only_refreshes_updated_at() {
        let mut task = Task::create(CreateTaskRequest {
            description: Some("keep me".to_string()),
            category_id: Some(2),
            ..create_request("Test Task")
        })
        .unwrap();
        let before = task.clone();

        task.update(UpdateTaskRequest::default()).unwrap();

        assert!(task.updated_at.is_some());
        assert_eq!(task.title, before.title);
        assert_eq!(task.description, before.description);
        assert_eq!(task.category_id, before.category_id);
        assert_eq!(task.due_date, before.due_date);
    }

    #[test]
    fn update_title_is_revalidated() {
        let mut task = Task::create(create_request("Test Task")).unwrap();

        let err = task
            .update(UpdateTaskRequest {
                title: Patch::Value("   ".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::invalid_argument("title", "Title cannot be empty")
        );
        assert_eq!(task.title, "Test Task");
    }

    #[test]
    fn update_applies_provided_fields() {
        let mut task = Task::create(create_request("Test Task")).unwrap();
        let due = Utc::now() + Duration::days(3);

        task.update(UpdateTaskRequest {
            title: Patch::Value("  Renamed  ".to_string()),
            assigned_to: Patch::Value(7),
            due_date: Patch::Value(due),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(task.title, "Renamed");
        assert_eq!(task.assigned_to, 7);
        assert_eq!(task.due_date, Some(due));
    }

    #[test]
    fn update_with_null_description_clears_it() {
        let mut task = Task::create(CreateTaskRequest {
            description: Some("to be removed".to_string()),
            ..create_request("Test Task")
        })
        .unwrap();

        task.update(UpdateTaskRequest {
            description: Patch::Null,
            ..Default::default()
        })
        .unwrap();

        assert!(task.description.is_none());
    }

    #[test]
    fn update_with_missing_description_keeps_it() {
        let mut task = Task::create(CreateTaskRequest {
            description: Some("keep me".to_string()),
            ..create_request("Test Task")
        })
        .unwrap();

        task.update(UpdateTaskRequest::default()).unwrap();

        assert_eq!(task.description.as_deref(), Some("keep me"));
    }

    #[test]
    fn is_overdue_when_due_date_passed_and_not_completed() {
        let mut task = Task::create(create_request("Test Task")).unwrap();
        task.due_date = Some(Utc::now() - Duration::days(1));

        assert!(task.is_overdue());
    }

    #[test]
    fn is_not_overdue_when_completed() {
        let mut task = Task::create(create_request("Test Task")).unwrap();
        task.due_date = Some(Utc::now() - Duration::days(1));
        task.complete().unwrap();

        assert!(!task.is_overdue());
    }

    #[test]
    fn is_not_overdue_without_due_date_or_before_it() {
        let mut task = Task::create(create_request("Test Task")).unwrap();
        assert!(!task.is_overdue());

        task.due_date = Some(Utc::now() + Duration::days(1));
        assert!(!task.is_overdue());
    }

    #[test]
    fn create_validator_collects_all_field_errors() {
        let request = CreateTaskRequest {
            title: String::new(),
            description: Some("d".repeat(501)),
            category_id: Some(0),
            ..create_request("")
        };

        let errors = request.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["title", "description", "category_id"]);
    }

    #[test]
    fn update_validator_ignores_missing_fields() {
        assert!(UpdateTaskRequest::default().validate().is_ok());

        let errors = UpdateTaskRequest {
            title: Patch::Value("t".repeat(51)),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "title");
    }
}
