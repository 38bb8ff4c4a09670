use axum::extract::{Json, Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::product::{NewProduct, Product, ProductPatch};
use crate::database::{products, AppState};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub category_id: Option<Uuid>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
}

/// POST /api/v1/products (admin-only)
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> ApiResult<Product> {
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let (Some(name), Some(price), Some(stock_quantity)) =
        (name, payload.price, payload.stock_quantity)
    else {
        return Err(ApiError::validation("Name, price and stock quantity are required"));
    };

    validate_numeric_fields(Some(price), Some(stock_quantity))?;

    // Pre-check across all rows, active or not; the UNIQUE constraint is the
    // authoritative guard under concurrent creates.
    if let Some(sku) = payload.sku.as_deref().filter(|s| !s.is_empty()) {
        if products::sku_exists(&state.pool, sku, None).await? {
            return Err(ApiError::conflict("A product with this SKU already exists"));
        }
    }

    let product = products::insert(
        &state.pool,
        NewProduct {
            name: name.to_string(),
            description: payload.description,
            price,
            stock_quantity,
            category_id: payload.category_id,
            sku: payload.sku.filter(|s| !s.is_empty()),
            image_url: payload.image_url,
        },
    )
    .await?;

    tracing::info!("Created product {} ({})", product.product_id, product.name);

    Ok(ApiResponse::created("Product created successfully", product))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub category_id: Option<Uuid>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// PUT /api/v1/products/:id (admin-only): partial update, matches rows
/// whether active or not.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> ApiResult<Product> {
    let product_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::validation("Invalid product ID"))?;

    validate_numeric_fields(payload.price, payload.stock_quantity)?;

    // SKU uniqueness excludes the row being updated
    if let Some(sku) = payload.sku.as_deref().filter(|s| !s.is_empty()) {
        if products::sku_exists(&state.pool, sku, Some(product_id)).await? {
            return Err(ApiError::conflict("A product with this SKU already exists"));
        }
    }

    let patch = ProductPatch {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        stock_quantity: payload.stock_quantity,
        category_id: payload.category_id,
        sku: payload.sku.filter(|s| !s.is_empty()),
        image_url: payload.image_url,
        is_active: payload.is_active,
    };

    let product = products::update(&state.pool, product_id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::ok("Product updated successfully", product))
}

fn validate_numeric_fields(price: Option<f64>, stock_quantity: Option<i32>) -> Result<(), ApiError> {
    if price.is_some_and(|p| p < 0.0) || stock_quantity.is_some_and(|q| q < 0) {
        return Err(ApiError::validation("Price and stock quantity must be non-negative"));
    }
    Ok(())
}
