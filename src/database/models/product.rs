use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog record. Soft-deleted rows stay in the table with
/// `is_active = false` and drop out of public listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub category_id: Option<Uuid>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for product creation. `is_active` and the timestamps are
/// server-assigned.
#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub category_id: Option<Uuid>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
}

/// Partial product update; absent fields keep their value.
#[derive(Debug, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub category_id: Option<Uuid>,
    pub sku: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}
