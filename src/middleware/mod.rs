pub mod auth;
pub mod response;

pub use auth::{authenticate, require_admin, require_user, AuthUser};
pub use response::{ApiResponse, ApiResult};
