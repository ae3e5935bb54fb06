//! Login route
//!
//! Demo-credential boundary adapter: there is no user store, only one
//! configured account. Everything downstream trusts the issued token.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if req.email != state.settings.admin_email || req.password != state.settings.admin_password {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state
        .tokens
        .issue(Uuid::new_v4(), &req.email, "Admin")
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(Json(LoginResponse { token }))
}
