use axum::extract::{Json, State};
use serde::Deserialize;

use super::{present, AuthPayload};
use crate::auth::{generate_jwt, Claims};
use crate::database::{users, AppState};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/v1/users/login
///
/// Unknown email and wrong password return the identical message so the
/// response does not leak which check failed.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<AuthPayload> {
    let (Some(email), Some(password)) = (
        present(&payload.email),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("Email and password are required"));
    };

    let user = users::find_active_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let password_matches = bcrypt::verify(password, &user.password_hash)?;
    if !password_matches {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let claims = Claims::new(user.user_id, user.email.clone(), user.role);
    let token = generate_jwt(&claims)?;

    Ok(ApiResponse::ok(
        "Login successful",
        AuthPayload { user: user.into(), token },
    ))
}
