use axum::extract::{Path, State};
use uuid::Uuid;

use crate::database::models::product::Product;
use crate::database::{products, AppState};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/v1/products: active products, newest first.
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = products::list_active(&state.pool).await?;
    Ok(ApiResponse::ok("Products fetched successfully", products))
}

/// GET /api/v1/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let product_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::validation("Invalid product ID"))?;

    let product = products::find_active_by_id(&state.pool, product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::ok("Product fetched successfully", product))
}

/// GET /api/v1/products/category/:category_id - an empty list is not an error.
pub async fn get_products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> ApiResult<Vec<Product>> {
    let category_id =
        Uuid::parse_str(&category_id).map_err(|_| ApiError::validation("Invalid category ID"))?;

    let products = products::list_active_by_category(&state.pool, category_id).await?;
    Ok(ApiResponse::ok("Products fetched successfully", products))
}
