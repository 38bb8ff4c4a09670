mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn register_returns_created_with_token_and_default_role() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("register");

    let res = client
        .post(format!("{}/api/v1/users/register", server.base_url))
        .json(&json!({
            "first_name": "A",
            "last_name": "B",
            "email": email,
            "password": "pw",
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["role"], "user");
    assert_eq!(body["data"]["user"]["email"], email.as_str());
    // Password hash never leaves the server
    assert!(body["data"]["user"].get("password_hash").is_none());

    // The issued token identifies the registered account
    let token = body["data"]["token"].as_str().unwrap();
    let profile: Value = client
        .get(format!("{}/api/v1/users/profile", server.base_url))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(profile["data"]["email"], email.as_str());
    Ok(())
}

#[tokio::test]
async fn register_with_missing_fields_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/users/register", server.base_url))
        .json(&json!({ "first_name": "A", "email": common::unique_email("missing") }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "All required fields must be provided");
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_conflicts() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("dup");

    let payload = json!({
        "first_name": "A",
        "last_name": "B",
        "email": email,
        "password": "pw",
    });

    let first = client
        .post(format!("{}/api/v1/users/register", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client
        .post(format!("{}/api/v1/users/register", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = second.json().await?;
    assert_eq!(body["message"], "User already exists with this email");
    Ok(())
}

#[tokio::test]
async fn login_failures_use_identical_message() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (email, _token) = common::register_user(server, "user").await?;

    // Correct password authenticates
    let ok = client
        .post(format!("{}/api/v1/users/login", server.base_url))
        .json(&json!({ "email": email, "password": "correct horse battery staple" }))
        .send()
        .await?;
    assert_eq!(ok.status(), StatusCode::OK);
    let ok_body: Value = ok.json().await?;
    assert!(ok_body["data"]["token"].as_str().is_some());

    // Wrong password and unknown email fail identically
    let wrong_password = client
        .post(format!("{}/api/v1/users/login", server.base_url))
        .json(&json!({ "email": email, "password": "nope" }))
        .send()
        .await?;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_body: Value = wrong_password.json().await?;

    let unknown_email = client
        .post(format!("{}/api/v1/users/login", server.base_url))
        .json(&json!({ "email": common::unique_email("never"), "password": "nope" }))
        .send()
        .await?;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = unknown_email.json().await?;

    assert_eq!(wrong_body["message"], unknown_body["message"]);
    Ok(())
}

#[tokio::test]
async fn profile_update_changes_own_row() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_email, token) = common::register_user(server, "user").await?;

    let res = client
        .put(format!("{}/api/v1/users/profile", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "first_name": "Renamed", "phone": "+1-555-0100" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["data"]["first_name"], "Renamed");
    assert_eq!(body["data"]["phone"], "+1-555-0100");
    // Untouched field keeps its value
    assert_eq!(body["data"]["last_name"], "Account");
    Ok(())
}

#[tokio::test]
async fn admin_can_list_and_update_users() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (_admin_email, admin_token) = common::register_user(server, "admin").await?;
    let (user_email, _user_token) = common::register_user(server, "user").await?;

    let list: Value = client
        .get(format!("{}/api/v1/users", server.base_url))
        .bearer_auth(&admin_token)
        .send()
        .await?
        .json()
        .await?;
    let users = list["data"].as_array().expect("user list");
    let target = users
        .iter()
        .find(|u| u["email"] == user_email.as_str())
        .expect("registered user in listing");
    assert!(target.get("password_hash").is_none());

    let user_id = target["user_id"].as_str().unwrap();
    let updated = client
        .put(format!("{}/api/v1/users/{}", server.base_url, user_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "admin", "is_active": false }))
        .send()
        .await?;
    assert_eq!(updated.status(), StatusCode::OK);

    let body: Value = updated.json().await?;
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["is_active"], false);

    // Invalid role value is rejected before any mutation
    let bad_role = client
        .put(format!("{}/api/v1/users/{}", server.base_url, user_id))
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "superuser", "is_active": true }))
        .send()
        .await?;
    assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
