use sqlx::PgPool;
use thiserror::Error;

pub mod models;
pub mod pool;
pub mod products;
pub mod users;

/// Shared application state threaded through the router. The pool is an
/// injected handle rather than a process-wide singleton so tests can stand
/// up their own database.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

/// Errors from the database gateway
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        // Concurrent check-then-act races on email/sku land here: the schema
        // carries UNIQUE constraints, so the losing insert surfaces as a
        // unique violation instead of a silent duplicate.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                let message = if constraint.contains("email") {
                    "User already exists with this email"
                } else if constraint.contains("sku") {
                    "A product with this SKU already exists"
                } else {
                    "A record with this value already exists"
                };
                return DatabaseError::UniqueViolation(message.to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}
