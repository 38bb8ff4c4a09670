//! Parameterized queries for the users table. Every function borrows the
//! shared pool for a single statement and releases it on return.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::user::{NewUser, ProfilePatch, Role, User};
use super::DatabaseError;

const USER_COLUMNS: &str = "user_id, first_name, last_name, email, password_hash, role, \
                            phone, date_of_birth, is_active, created_at, updated_at";

/// Existence check used before insert. The UNIQUE constraint on email is the
/// authoritative guard; this pre-check only produces the friendlier message.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, DatabaseError> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn insert(pool: &PgPool, new_user: NewUser) -> Result<User, DatabaseError> {
    let query = format!(
        "INSERT INTO users (user_id, first_name, last_name, email, password_hash, phone, role) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {USER_COLUMNS}"
    );

    let user = sqlx::query_as::<_, User>(&query)
        .bind(Uuid::new_v4())
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.phone)
        .bind(new_user.role)
        .fetch_one(pool)
        .await?;

    Ok(user)
}

/// Login lookup: only active accounts can authenticate.
pub async fn find_active_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND is_active = TRUE");

    let user = sqlx::query_as::<_, User>(&query)
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");

    let user = sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Partial self-service update of the caller's own row. Returns None if the
/// row vanished between identity issuance and the update.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    patch: ProfilePatch,
) -> Result<Option<User>, DatabaseError> {
    let query = format!(
        "UPDATE users SET \
             first_name = COALESCE($2, first_name), \
             last_name = COALESCE($3, last_name), \
             phone = COALESCE($4, phone), \
             date_of_birth = COALESCE($5, date_of_birth), \
             updated_at = NOW() \
         WHERE user_id = $1 \
         RETURNING {USER_COLUMNS}"
    );

    let user = sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.phone)
        .bind(patch.date_of_birth)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// All users, newest first. Admin listing only.
pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, DatabaseError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");

    let users = sqlx::query_as::<_, User>(&query).fetch_all(pool).await?;
    Ok(users)
}

/// Admin role/activation change. Returns None if the id matches no row.
pub async fn update_role_active(
    pool: &PgPool,
    user_id: Uuid,
    role: Role,
    is_active: bool,
) -> Result<Option<User>, DatabaseError> {
    let query = format!(
        "UPDATE users SET role = $2, is_active = $3, updated_at = NOW() \
         WHERE user_id = $1 \
         RETURNING {USER_COLUMNS}"
    );

    let user = sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .bind(role)
        .bind(is_active)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
