mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_register_returns_created_user_summary() {
    let server = common::spawn_app();

    let body = common::register(&server, "alice", "alice@x.com", "password1").await;

    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@x.com");
    assert_eq!(body["first_name"], "Alice");
    assert!(body["id"].is_i64());
    assert!(body["created"].is_string());
    // summary never exposes credentials
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_normalizes_username_and_email() {
    let server = common::spawn_app();

    let body = common::register(&server, "AlIcE", "Alice@X.COM", "password1").await;

    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@x.com");
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let server = common::spawn_app();

    let response = server
        .post("/user/register")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Doe",
            "email": "alice@x.com",
            "username": "al",
            "password": "password1",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(
        body["error"]["message"],
        "username must be between 3 to 20 characters."
    );
}

#[tokio::test]
async fn test_register_rejects_duplicate_username_case_insensitively() {
    let server = common::spawn_app();

    common::register(&server, "alice", "alice@x.com", "password1").await;

    let response = server
        .post("/user/register")
        .json(&json!({
            "first_name": "Another",
            "last_name": "Person",
            "email": "other@x.com",
            "username": "ALICE",
            "password": "password1",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["message"], "username already taken.");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let server = common::spawn_app();

    common::register(&server, "alice", "alice@x.com", "password1").await;

    let response = server
        .post("/user/register")
        .json(&json!({
            "first_name": "Another",
            "last_name": "Person",
            "email": "alice@x.com",
            "username": "bob",
            "password": "password1",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["message"], "email address already exists.");
}

#[tokio::test]
async fn test_register_rejects_bad_email_and_password() {
    let server = common::spawn_app();

    let response = server
        .post("/user/register")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Doe",
            "email": "not-an-email",
            "username": "alice",
            "password": "password1",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "please provide valid email address."
    );

    let response = server
        .post("/user/register")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Doe",
            "email": "alice@x.com",
            "username": "alice",
            "password": "short",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "password must be between 8 to 20 characters."
    );
}

#[tokio::test]
async fn test_login_returns_token_and_usage_hint() {
    let server = common::spawn_app();
    common::register(&server, "alice", "alice@x.com", "password1").await;

    let response = server
        .post("/user/login")
        .json(&json!({ "username": "alice", "password": "password1" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert!(body["usage"].as_str().unwrap().contains("Bearer"));
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let server = common::spawn_app();
    common::register(&server, "alice", "alice@x.com", "password1").await;

    let response = server
        .post("/user/login")
        .json(&json!({ "username": "alice", "password": "password2" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid credentials"
    );
}

#[tokio::test]
async fn test_login_rejects_unknown_user_identically() {
    let server = common::spawn_app();

    let response = server
        .post("/user/login")
        .json(&json!({ "username": "ghost", "password": "password1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid credentials"
    );
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let server = common::spawn_app();

    let response = server.get("/user").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_logout_revokes_current_token() {
    let server = common::spawn_app();
    let token = common::register_and_login(&server, "alice").await;

    // token works before logout
    server
        .get("/user")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let response = server.get("/user/logout").authorization_bearer(&token).await;
    response.assert_status(StatusCode::NO_CONTENT);

    // same token is now rejected, even though signature and expiry are fine
    server
        .get("/user")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let server = common::spawn_app();
    let token = common::register_and_login(&server, "alice").await;

    server
        .get("/user/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get("/user/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_logout_without_token_succeeds() {
    let server = common::spawn_app();

    let response = server.get("/user/logout").await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_logout_with_garbage_token_succeeds() {
    let server = common::spawn_app();

    let response = server
        .get("/user/logout")
        .authorization_bearer("not.a.token")
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_index_returns_no_content() {
    let server = common::spawn_app();

    server.get("/").await.assert_status(StatusCode::NO_CONTENT);
}
