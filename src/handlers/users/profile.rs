use axum::extract::{Extension, Json, State};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::models::user::{ProfilePatch, UserSummary};
use crate::database::{users, AppState};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/v1/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<UserSummary> {
    let user = users::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::ok("Profile fetched successfully", user.into()))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// PUT /api/v1/users/profile
///
/// Updates the caller's own row only; 404 if the row vanished between
/// identity issuance and the update.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<UserSummary> {
    let patch = ProfilePatch {
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        date_of_birth: payload.date_of_birth,
    };

    let user = users::update_profile(&state.pool, auth_user.user_id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::ok("Profile updated successfully", user.into()))
}
