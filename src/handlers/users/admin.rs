use axum::extract::{Json, Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::user::{Role, UserSummary};
use crate::database::{users, AppState};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/v1/users (admin-only): every user minus password hashes,
/// newest-created first.
pub async fn get_all_users(State(state): State<AppState>) -> ApiResult<Vec<UserSummary>> {
    let summaries: Vec<UserSummary> = users::list_all(&state.pool)
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(ApiResponse::ok("Users fetched successfully", summaries))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// PUT /api/v1/users/:id (admin-only): role and activation changes.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<UserSummary> {
    let user_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::validation("Invalid user ID"))?;

    let (Some(role), Some(is_active)) = (payload.role, payload.is_active) else {
        return Err(ApiError::validation("Role and is_active are required"));
    };

    let role = role
        .parse::<Role>()
        .map_err(|_| ApiError::validation("Role must be either 'user' or 'admin'"))?;

    let user = users::update_role_active(&state.pool, user_id, role, is_active)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!("Admin updated user {}: role={}, is_active={}", user_id, role, is_active);

    Ok(ApiResponse::ok("User updated successfully", user.into()))
}
