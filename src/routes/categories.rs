//! Category routes

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::pagination::{PagedResult, PageParams};
use crate::api::response::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::category::{
    Category, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::repo::CategoryRepo;

/// GET /api/categories
///
/// List categories, paged.
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    _auth: RequireAuth,
) -> ApiResult<PagedResult<CategoryResponse>> {
    params.validate().map_err(ApiError::Validation)?;

    let page = CategoryRepo::new(state.db.clone()).get_paged(&params).await?;
    Ok(page.map(CategoryResponse::from))
}

/// GET /api/categories/:id
///
/// Get a specific category.
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    _auth: RequireAuth,
) -> ApiResult<DataResponse<CategoryResponse>> {
    let category = CategoryRepo::new(state.db.clone())
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Category",
            id,
        })?;

    Ok(DataResponse::new(category.into()))
}

/// POST /api/categories
///
/// Create a new category.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    _auth: RequireAuth,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<Created<DataResponse<CategoryResponse>>> {
    req.validate().map_err(ApiError::Validation)?;

    let category = Category::create(req)?;
    let created = CategoryRepo::new(state.db.clone()).add(&category).await?;

    tracing::info!(category_id = created.id, "Category created");
    Ok(Created(DataResponse::new(created.into())))
}

/// PUT /api/categories/:id
///
/// Partially update a category; only fields present in the body are applied.
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    _auth: RequireAuth,
    Json(req): Json<UpdateCategoryRequest>,
) -> ApiResult<NoContent> {
    req.validate().map_err(ApiError::Validation)?;

    let repo = CategoryRepo::new(state.db.clone());
    let mut category = repo.get_by_id(id).await?.ok_or(ApiError::NotFound {
        entity: "Category",
        id,
    })?;

    category.update(req)?;
    repo.update(&category).await?;

    Ok(NoContent)
}

/// DELETE /api/categories/:id
///
/// Delete a category.
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    _auth: RequireAuth,
) -> ApiResult<NoContent> {
    let repo = CategoryRepo::new(state.db.clone());
    if !repo.exists(id).await? {
        return Err(ApiError::NotFound {
            entity: "Category",
            id,
        });
    }

    repo.delete(id).await?;
    tracing::info!(category_id = id, "Category deleted");
    Ok(NoContent)
}
