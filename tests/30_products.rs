mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_product(
    server: &common::TestServer,
    admin_token: &str,
    payload: Value,
) -> Result<reqwest::Response> {
    let client = reqwest::Client::new();
    Ok(client
        .post(format!("{}/api/v1/products", server.base_url))
        .bearer_auth(admin_token)
        .json(&payload)
        .send()
        .await?)
}

#[tokio::test]
async fn created_product_round_trips_through_lookup() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_email, admin_token) = common::register_user(server, "admin").await?;
    let sku = common::unique_sku("roundtrip");

    let res = create_product(
        server,
        &admin_token,
        json!({
            "name": "Mechanical Keyboard",
            "description": "Tenkeyless, brown switches",
            "price": 89.99,
            "stock_quantity": 12,
            "sku": sku,
        }),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let created: Value = res.json().await?;
    assert_eq!(created["success"], true);
    let product = &created["data"];
    assert_eq!(product["is_active"], true);
    assert!(product["product_id"].as_str().is_some());
    assert!(product["created_at"].as_str().is_some());

    let id = product["product_id"].as_str().unwrap();
    let fetched: Value = client
        .get(format!("{}/api/v1/products/{}", server.base_url, id))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(fetched["data"]["name"], "Mechanical Keyboard");
    assert_eq!(fetched["data"]["description"], "Tenkeyless, brown switches");
    assert_eq!(fetched["data"]["price"], 89.99);
    assert_eq!(fetched["data"]["stock_quantity"], 12);
    assert_eq!(fetched["data"]["sku"], sku.as_str());

    // And it shows up in the public listing
    let listing: Value = client
        .get(format!("{}/api/v1/products", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(listing["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["product_id"] == id));
    Ok(())
}

#[tokio::test]
async fn negative_price_or_stock_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let (_email, admin_token) = common::register_user(server, "admin").await?;

    let negative_price = create_product(
        server,
        &admin_token,
        json!({ "name": "Broken", "price": -1.0, "stock_quantity": 5 }),
    )
    .await?;
    assert_eq!(negative_price.status(), StatusCode::BAD_REQUEST);

    let negative_stock = create_product(
        server,
        &admin_token,
        json!({ "name": "Broken", "price": 1.0, "stock_quantity": -5 }),
    )
    .await?;
    assert_eq!(negative_stock.status(), StatusCode::BAD_REQUEST);

    let missing_fields = create_product(server, &admin_token, json!({ "name": "Broken" })).await?;
    assert_eq!(missing_fields.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn duplicate_sku_conflicts() -> Result<()> {
    let server = common::ensure_server().await?;
    let (_email, admin_token) = common::register_user(server, "admin").await?;
    let sku = common::unique_sku("dup");

    let first = create_product(
        server,
        &admin_token,
        json!({ "name": "First", "price": 5.0, "stock_quantity": 1, "sku": sku }),
    )
    .await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = create_product(
        server,
        &admin_token,
        json!({ "name": "Second", "price": 5.0, "stock_quantity": 1, "sku": sku }),
    )
    .await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = second.json().await?;
    assert_eq!(body["message"], "A product with this SKU already exists");
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_unspecified_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_email, admin_token) = common::register_user(server, "admin").await?;

    let created: Value = create_product(
        server,
        &admin_token,
        json!({ "name": "Mouse", "price": 25.0, "stock_quantity": 30 }),
    )
    .await?
    .json()
    .await?;
    let id = created["data"]["product_id"].as_str().unwrap().to_string();

    let res = client
        .put(format!("{}/api/v1/products/{}", server.base_url, id))
        .bearer_auth(&admin_token)
        .json(&json!({ "price": 19.99 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["data"]["price"], 19.99);
    assert_eq!(body["data"]["name"], "Mouse");
    assert_eq!(body["data"]["stock_quantity"], 30);
    Ok(())
}

#[tokio::test]
async fn soft_delete_hides_product_and_is_not_idempotent() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_email, admin_token) = common::register_user(server, "admin").await?;

    let created: Value = create_product(
        server,
        &admin_token,
        json!({ "name": "Ephemeral", "price": 1.0, "stock_quantity": 1 }),
    )
    .await?
    .json()
    .await?;
    let id = created["data"]["product_id"].as_str().unwrap().to_string();

    let deleted = client
        .delete(format!("{}/api/v1/products/{}", server.base_url, id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = deleted.json().await?;
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_none());

    // Excluded from public lookup after the flag flip
    let lookup = client
        .get(format!("{}/api/v1/products/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);

    // A second soft delete reports not-found, never a second success
    let again = client
        .delete(format!("{}/api/v1/products/{}", server.base_url, id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    // But the row still exists for admin update (reactivation)
    let reactivate = client
        .put(format!("{}/api/v1/products/{}", server.base_url, id))
        .bearer_auth(&admin_token)
        .json(&json!({ "is_active": true }))
        .send()
        .await?;
    assert_eq!(reactivate.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn hard_delete_removes_the_row_permanently() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_email, admin_token) = common::register_user(server, "admin").await?;

    let created: Value = create_product(
        server,
        &admin_token,
        json!({ "name": "Doomed", "price": 1.0, "stock_quantity": 1 }),
    )
    .await?
    .json()
    .await?;
    let id = created["data"]["product_id"].as_str().unwrap().to_string();

    let deleted = client
        .delete(format!("{}/api/v1/products/{}/permanent", server.base_url, id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::OK);

    // Gone even for admin update
    let update = client
        .put(format!("{}/api/v1/products/{}", server.base_url, id))
        .bearer_auth(&admin_token)
        .json(&json!({ "price": 2.0 }))
        .send()
        .await?;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let again = client
        .delete(format!("{}/api/v1/products/{}/permanent", server.base_url, id))
        .bearer_auth(&admin_token)
        .send()
        .await?;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_ids_and_empty_categories() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let bad_id = client
        .get(format!("{}/api/v1/products/not-a-uuid", server.base_url))
        .send()
        .await?;
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

    // A category with no products is an empty list, not an error
    let empty = client
        .get(format!(
            "{}/api/v1/products/category/00000000-0000-0000-0000-000000000000",
            server.base_url
        ))
        .send()
        .await?;
    assert_eq!(empty.status(), StatusCode::OK);
    let body: Value = empty.json().await?;
    assert_eq!(body["data"], json!([]));
    Ok(())
}
