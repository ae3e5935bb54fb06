//! Task repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::api::pagination::{PagedResult, PageParams};
use crate::domain::category::{Category, TaskColor};
use crate::domain::task::Task;

/// Database row for a task joined with its category, if any
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i32,
    title: String,
    description: Option<String>,
    assigned_to: i32,
    category_id: i32,
    due_date: Option<DateTime<Utc>>,
    reminder_at: Option<DateTime<Utc>>,
    is_completed: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    category_row_id: Option<i32>,
    category_name: Option<String>,
    category_description: Option<String>,
    category_color: Option<String>,
    category_created_at: Option<DateTime<Utc>>,
    category_updated_at: Option<DateTime<Utc>>,
}

impl TaskRow {
    fn into_parts(self) -> (Task, Option<Category>) {
        let category = match (
            self.category_row_id,
            self.category_name,
            self.category_created_at,
        ) {
            (Some(id), Some(name), Some(created_at)) => Some(Category {
                id,
                name,
                description: self.category_description,
                color: self
                    .category_color
                    .as_deref()
                    .and_then(TaskColor::from_str),
                created_at,
                updated_at: self.category_updated_at,
            }),
            _ => None,
        };

        let task = Task {
            id: self.id,
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            category_id: self.category_id,
            due_date: self.due_date,
            reminder_at: self.reminder_at,
            is_completed: self.is_completed,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        (task, category)
    }
}

const SELECT_TASK: &str = r#"
    SELECT t.id, t.title, t.description, t.assigned_to, t.category_id,
           t.due_date, t.reminder_at, t.is_completed, t.completed_at,
           t.created_at, t.updated_at,
           c.id AS category_row_id, c.name AS category_name,
           c.description AS category_description, c.color AS category_color,
           c.created_at AS category_created_at, c.updated_at AS category_updated_at
    FROM tasks t
    LEFT JOIN categories c ON t.category_id = c.id
"#;

#[derive(Clone)]
pub struct TaskRepo {
    pool: PgPool,
}

impl TaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<(Task, Option<Category>)>, sqlx::Error> {
        let row = sqlx::query_as::<_, TaskRow>(&format!("{SELECT_TASK} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TaskRow::into_parts))
    }

    pub async fn get_paged(
        &self,
        params: &PageParams,
    ) -> Result<PagedResult<(Task, Option<Category>)>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "{SELECT_TASK} ORDER BY t.id LIMIT $1 OFFSET $2"
        ))
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows.into_iter().map(TaskRow::into_parts).collect();
        Ok(PagedResult::new(items, total.max(0) as u64, params))
    }

    /// Insert a new task and return it with its store-assigned id
    pub async fn add(&self, task: &Task) -> Result<Task, sqlx::Error> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (title, description, assigned_to, category_id,
                               due_date, reminder_at, is_completed, completed_at,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.assigned_to)
        .bind(task.category_id)
        .bind(task.due_date)
        .bind(task.reminder_at)
        .bind(task.is_completed)
        .bind(task.completed_at)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        let mut created = task.clone();
        created.id = id;
        Ok(created)
    }

    /// Write all fields of an existing task (last-write-wins)
    pub async fn update(&self, task: &Task) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, assigned_to = $4, category_id = $5,
                due_date = $6, reminder_at = $7, is_completed = $8,
                completed_at = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.assigned_to)
        .bind(task.category_id)
        .bind(task.due_date)
        .bind(task.reminder_at)
        .bind(task.is_completed)
        .bind(task.completed_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}
