//! Category repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::api::pagination::{PagedResult, PageParams};
use crate::domain::category::{Category, TaskColor};

/// Database row for a category
#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    description: Option<String>,
    color: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            color: row.color.as_deref().and_then(TaskColor::from_str),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_CATEGORY: &str =
    "SELECT id, name, description, color, created_at, updated_at FROM categories";

#[derive(Clone)]
pub struct CategoryRepo {
    pool: PgPool,
}

impl CategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Category>, sqlx::Error> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!("{SELECT_CATEGORY} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn get_paged(
        &self,
        params: &PageParams,
    ) -> Result<PagedResult<Category>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "{SELECT_CATEGORY} ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows.into_iter().map(Into::into).collect();
        Ok(PagedResult::new(items, total.max(0) as u64, params))
    }

    /// Insert a new category and return it with its store-assigned id
    pub async fn add(&self, category: &Category) -> Result<Category, sqlx::Error> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name, description, color, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.color.map(|c| c.as_str()))
        .bind(category.created_at)
        .bind(category.updated_at)
        .fetch_one(&self.pool)
        .await?;

        let mut created = category.clone();
        created.id = id;
        Ok(created)
    }

    /// Write all fields of an existing category (last-write-wins)
    pub async fn update(&self, category: &Category) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, description = $3, color = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.color.map(|c| c.as_str()))
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}
