pub mod admin;
pub mod login;
pub mod profile;
pub mod register;

pub use admin::{get_all_users, update_user};
pub use login::login;
pub use profile::{get_profile, update_profile};
pub use register::register;

use serde::Serialize;

use crate::database::models::user::UserSummary;

/// Response payload shared by registration and login: the user summary plus
/// a freshly issued bearer token.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: UserSummary,
    pub token: String,
}

/// Treat empty strings like missing fields, matching the original API's
/// falsy-field checks.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
