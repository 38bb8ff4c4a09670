use axum::extract::{Json, State};
use serde::Deserialize;

use super::{present, AuthPayload};
use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::database::models::user::{NewUser, Role};
use crate::database::{users, AppState};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// POST /api/v1/users/register
///
/// Creates an account, hashes the password (cost factor 10), and issues a
/// 1-hour bearer token. Role defaults to `user`; an explicit `admin` request
/// is honored without an authorization gate, which is a known design gap
/// carried over from the original API rather than a fix to make here.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<AuthPayload> {
    let (Some(first_name), Some(last_name), Some(email), Some(password)) = (
        present(&payload.first_name),
        present(&payload.last_name),
        present(&payload.email),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("All required fields must be provided"));
    };

    let role = match payload.role.as_deref() {
        None => Role::User,
        Some(value) => value
            .parse::<Role>()
            .map_err(|_| ApiError::validation("Role must be either 'user' or 'admin'"))?,
    };

    // Pre-check for the friendly message; the UNIQUE constraint catches the
    // concurrent-registration race and also maps to a conflict.
    if users::email_exists(&state.pool, email).await? {
        return Err(ApiError::conflict("User already exists with this email"));
    }

    let password_hash = bcrypt::hash(password, config::config().security.bcrypt_cost)?;

    let user = users::insert(
        &state.pool,
        NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash,
            phone: present(&payload.phone).map(str::to_string),
            role,
        },
    )
    .await?;

    let claims = Claims::new(user.user_id, user.email.clone(), user.role);
    let token = generate_jwt(&claims)?;

    tracing::info!("Registered user {} ({})", user.user_id, user.email);

    Ok(ApiResponse::created(
        "User registered successfully",
        AuthPayload { user: user.into(), token },
    ))
}
