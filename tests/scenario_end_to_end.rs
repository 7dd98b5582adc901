mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

/// Full user journey: register, login, shorten, resolve, delete, miss.
#[tokio::test]
async fn test_full_shortening_lifecycle() {
    let server = common::spawn_app();

    // register
    let response = server
        .post("/user/register")
        .json(&json!({
            "first_name": "Alice",
            "last_name": "Doe",
            "email": "alice@x.com",
            "username": "alice",
            "password": "password1",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    // login
    let response = server
        .post("/user/login")
        .json(&json!({ "username": "alice", "password": "password1" }))
        .await;
    response.assert_status_ok();
    let token = response.json::<Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    // shorten
    let response = server
        .post("/url/short")
        .authorization_bearer(&token)
        .json(&json!({ "url": "https://example.com/page" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let link = response.json::<Value>();
    let slug = link["slug"].as_str().unwrap().to_string();
    let id = link["id"].as_i64().unwrap();

    assert!(slug.len() <= 7);
    assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(link["target"], "https://example.com/page");
    assert_eq!(link["visit_count"], 0);

    // resolve
    let response = server.get(&format!("/url/go/{slug}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["target"], "https://example.com/page");

    let owned = server
        .get(&format!("/url/{id}"))
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(owned["visit_count"], 1);

    // delete (logical), then the slug stops resolving
    server
        .delete(&format!("/url/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
    server
        .get(&format!("/url/go/{slug}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
