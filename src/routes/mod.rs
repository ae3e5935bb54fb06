pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        // Tasks
        .route("/api/tasks", get(tasks::list_tasks))
        .route("/api/tasks", post(tasks::create_task))
        .route("/api/tasks/:id", get(tasks::get_task))
        .route("/api/tasks/:id", put(tasks::update_task))
        .route("/api/tasks/:id", delete(tasks::delete_task))
        .route("/api/tasks/:id/complete", post(tasks::complete_task))
        // Categories
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories", post(categories::create_category))
        .route("/api/categories/:id", get(categories::get_category))
        .route("/api/categories/:id", put(categories::update_category))
        .route("/api/categories/:id", delete(categories::delete_category))
}
