//! Parameterized queries for the products table.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::product::{NewProduct, Product, ProductPatch};
use super::DatabaseError;

/// Soft delete flips `is_active` and is reversible; hard delete removes the
/// row permanently. The two are separate operations with separate endpoints
/// and must never be collapsed into one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionMode {
    Soft,
    Hard,
}

/// Active products, newest first.
pub async fn list_active(pool: &PgPool) -> Result<Vec<Product>, DatabaseError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE is_active = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Active product by id; soft-deleted rows are excluded from public lookup.
pub async fn find_active_by_id(pool: &PgPool, product_id: Uuid) -> Result<Option<Product>, DatabaseError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE product_id = $1 AND is_active = TRUE",
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn list_active_by_category(
    pool: &PgPool,
    category_id: Uuid,
) -> Result<Vec<Product>, DatabaseError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE category_id = $1 AND is_active = TRUE \
         ORDER BY created_at DESC",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// SKU uniqueness pre-check across all rows, active or not. On update the
/// row being edited is excluded. The UNIQUE constraint remains the
/// authoritative guard under concurrency.
pub async fn sku_exists(
    pool: &PgPool,
    sku: &str,
    exclude_product: Option<Uuid>,
) -> Result<bool, DatabaseError> {
    let row: Option<(Uuid,)> = match exclude_product {
        Some(product_id) => {
            sqlx::query_as("SELECT product_id FROM products WHERE sku = $1 AND product_id <> $2")
                .bind(sku)
                .bind(product_id)
                .fetch_optional(pool)
                .await?
        }
        None => {
            sqlx::query_as("SELECT product_id FROM products WHERE sku = $1")
                .bind(sku)
                .fetch_optional(pool)
                .await?
        }
    };

    Ok(row.is_some())
}

pub async fn insert(pool: &PgPool, new_product: NewProduct) -> Result<Product, DatabaseError> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products \
             (product_id, name, description, price, stock_quantity, category_id, sku, image_url) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&new_product.name)
    .bind(&new_product.description)
    .bind(new_product.price)
    .bind(new_product.stock_quantity)
    .bind(new_product.category_id)
    .bind(&new_product.sku)
    .bind(&new_product.image_url)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Partial update. Matches any row, active or not, so admins can edit and
/// reactivate soft-deleted products. Returns None if the id is unmatched.
pub async fn update(
    pool: &PgPool,
    product_id: Uuid,
    patch: ProductPatch,
) -> Result<Option<Product>, DatabaseError> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             price = COALESCE($4, price), \
             stock_quantity = COALESCE($5, stock_quantity), \
             category_id = COALESCE($6, category_id), \
             sku = COALESCE($7, sku), \
             image_url = COALESCE($8, image_url), \
             is_active = COALESCE($9, is_active), \
             updated_at = NOW() \
         WHERE product_id = $1 \
         RETURNING *",
    )
    .bind(product_id)
    .bind(&patch.name)
    .bind(&patch.description)
    .bind(patch.price)
    .bind(patch.stock_quantity)
    .bind(patch.category_id)
    .bind(&patch.sku)
    .bind(&patch.image_url)
    .bind(patch.is_active)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// Delete in the requested mode. Returns whether a row was affected.
/// Soft delete only matches active rows, so repeating it reports not-found
/// rather than a second success.
pub async fn delete(
    pool: &PgPool,
    product_id: Uuid,
    mode: DeletionMode,
) -> Result<bool, DatabaseError> {
    let result = match mode {
        DeletionMode::Soft => {
            sqlx::query(
                "UPDATE products SET is_active = FALSE, updated_at = NOW() \
                 WHERE product_id = $1 AND is_active = TRUE",
            )
            .bind(product_id)
            .execute(pool)
            .await?
        }
        DeletionMode::Hard => {
            sqlx::query("DELETE FROM products WHERE product_id = $1")
                .bind(product_id)
                .execute(pool)
                .await?
        }
    };

    Ok(result.rows_affected() > 0)
}
