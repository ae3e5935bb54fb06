//! Task routes
//!
//! CRUD plus the one-way complete transition. Handlers validate the request
//! shape, let the entity enforce its invariants, and persist through the
//! repository in a single round trip.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::pagination::{PagedResult, PageParams};
use crate::api::response::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::category::CategoryResponse;
use crate::domain::task::{CreateTaskRequest, Task, TaskResponse, UpdateTaskRequest};
use crate::error::{ApiError, ApiResult};
use crate::repo::TaskRepo;

/// GET /api/tasks
///
/// List tasks, paged.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    _auth: RequireAuth,
) -> ApiResult<PagedResult<TaskResponse>> {
    params.validate().map_err(ApiError::Validation)?;

    let page = TaskRepo::new(state.db.clone()).get_paged(&params).await?;

    Ok(page.map(|(task, category)| {
        TaskResponse::from_entity(task, category.map(CategoryResponse::from))
    }))
}

/// GET /api/tasks/:id
///
/// Get a specific task with its category, if any.
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    _auth: RequireAuth,
) -> ApiResult<DataResponse<TaskResponse>> {
    let (task, category) = TaskRepo::new(state.db.clone())
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { entity: "Task", id })?;

    Ok(DataResponse::new(TaskResponse::from_entity(
        task,
        category.map(CategoryResponse::from),
    )))
}

/// POST /api/tasks
///
/// Create a new task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    _auth: RequireAuth,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Created<DataResponse<TaskResponse>>> {
    req.validate().map_err(ApiError::Validation)?;

    let task = Task::create(req)?;
    let created = TaskRepo::new(state.db.clone()).add(&task).await?;

    tracing::info!(task_id = created.id, "Task created");
    Ok(Created(DataResponse::new(TaskResponse::from_entity(
        created, None,
    ))))
}

/// PUT /api/tasks/:id
///
/// Partially update a task; only fields present in the body are applied.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    _auth: RequireAuth,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<NoContent> {
    req.validate().map_err(ApiError::Validation)?;

    let repo = TaskRepo::new(state.db.clone());
    let (mut task, _) = repo
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { entity: "Task", id })?;

    task.update(req)?;
    repo.update(&task).await?;

    Ok(NoContent)
}

/// POST /api/tasks/:id/complete
///
/// Mark a task as completed. Fails when it already is.
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    _auth: RequireAuth,
) -> ApiResult<DataResponse<TaskResponse>> {
    let repo = TaskRepo::new(state.db.clone());
    let (mut task, category) = repo
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { entity: "Task", id })?;

    task.complete()?;
    repo.update(&task).await?;

    tracing::info!(task_id = id, "Task completed");
    Ok(DataResponse::new(TaskResponse::from_entity(
        task,
        category.map(CategoryResponse::from),
    )))
}

/// DELETE /api/tasks/:id
///
/// Delete a task.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    _auth: RequireAuth,
) -> ApiResult<NoContent> {
    let repo = TaskRepo::new(state.db.clone());
    if !repo.exists(id).await? {
        return Err(ApiError::NotFound { entity: "Task", id });
    }

    repo.delete(id).await?;
    tracing::info!(task_id = id, "Task deleted");
    Ok(NoContent)
}
