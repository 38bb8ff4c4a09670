use axum::extract::{Path, State};
use uuid::Uuid;

use crate::database::products::{self, DeletionMode};
use crate::database::AppState;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

/// DELETE /api/v1/products/:id (admin-only): soft delete. Reversible via
/// update with `is_active = true`. Repeating it yields 404 because the row
/// is no longer active.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let product_id = parse_product_id(&id)?;

    let deleted = products::delete(&state.pool, product_id, DeletionMode::Soft).await?;
    if !deleted {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(ApiResponse::message_only("Product deleted successfully"))
}

/// DELETE /api/v1/products/:id/permanent (admin-only): irreversible row
/// removal. Kept as a separate operation from soft delete.
pub async fn hard_delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let product_id = parse_product_id(&id)?;

    let deleted = products::delete(&state.pool, product_id, DeletionMode::Hard).await?;
    if !deleted {
        return Err(ApiError::not_found("Product not found"));
    }

    tracing::info!("Permanently deleted product {}", product_id);

    Ok(ApiResponse::message_only("Product permanently deleted"))
}

fn parse_product_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::validation("Invalid product ID"))
}
