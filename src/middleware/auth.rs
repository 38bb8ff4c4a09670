use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::Claims;
use crate::config;
use crate::database::models::user::Role;
use crate::error::ApiError;

/// Authenticated identity extracted from the bearer token. Lives in the
/// request extensions for the lifetime of that request only.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// JWT authentication middleware: extracts the bearer token, verifies
/// signature and expiry, and injects the typed identity into the request.
pub async fn authenticate(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Access denied. No token provided."))?;

    let claims = verify_jwt(&token)?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Requires an already-attached identity with the admin role.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Access denied. No token provided."))?;

    if auth_user.role != Role::Admin {
        return Err(ApiError::forbidden("Admin privileges required"));
    }

    Ok(next.run(request).await)
}

/// Requires an already-attached identity; both roles pass.
pub async fn require_user(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Access denied. No token provided."))?;

    match auth_user.role {
        Role::User | Role::Admin => Ok(next.run(request).await),
    }
}

/// The token is whatever follows the first space in the header value.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let (_, token) = value.split_once(' ')?;

    if token.trim().is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn verify_jwt(token: &str) -> Result<Claims, ApiError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        tracing::error!("JWT secret not configured");
        return Err(ApiError::internal("Server configuration error", "JWT secret not configured"));
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|_| ApiError::invalid_token("Invalid or expired token."))?;

    Ok(token_data.claims)
}
