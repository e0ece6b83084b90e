mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn register_returns_token_and_monotonic_ids() {
    let server = common::test_server();

    let res = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "ada@example.com",
            "password": "password1",
            "nameFirst": "Ada",
            "nameLast": "Lovelace",
        }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["authUserId"], 1);
    assert!(!body["token"].as_str().unwrap().is_empty());

    let (second_id, _) = common::register_user(&server, "bob@example.com", "Bob", "Byte").await;
    assert_eq!(second_id, 2);
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let server = common::test_server();

    for payload in [
        json!({"email": "not-an-email", "password": "password1", "nameFirst": "Ada", "nameLast": "Lovelace"}),
        json!({"email": "ada@example.com", "password": "short", "nameFirst": "Ada", "nameLast": "Lovelace"}),
        json!({"email": "ada@example.com", "password": "password1", "nameFirst": "", "nameLast": "Lovelace"}),
        json!({"email": "ada@example.com", "password": "password1", "nameFirst": "Ada", "nameLast": "x".repeat(51)}),
    ] {
        let res = server.post("/api/auth/register").json(&payload).await;
        res.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let server = common::test_server();
    common::register_user(&server, "ada@example.com", "Ada", "Lovelace").await;

    let res = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "ada@example.com",
            "password": "password1",
            "nameFirst": "Other",
            "nameLast": "Person",
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn handle_is_derived_and_uniqued() {
    let server = common::test_server();
    let (u1, token) = common::register_user(&server, "a@example.com", "Ada", "Lovelace").await;
    let (u2, _) = common::register_user(&server, "b@example.com", "Ada", "Lovelace").await;

    let (h, v) = common::auth_header(&token);
    let res = server.get(&format!("/api/users/{}", u1)).add_header(h, v).await;
    assert_eq!(res.json::<Value>()["handle"], "adalovelace");

    let (h, v) = common::auth_header(&token);
    let res = server.get(&format!("/api/users/{}", u2)).add_header(h, v).await;
    assert_eq!(res.json::<Value>()["handle"], "adalovelace0");
}

#[tokio::test]
async fn handle_is_truncated_to_twenty_chars() {
    let server = common::test_server();
    let (u1, token) =
        common::register_user(&server, "long@example.com", "Maximiliana", "Constantinopolis").await;

    let (h, v) = common::auth_header(&token);
    let res = server.get(&format!("/api/users/{}", u1)).add_header(h, v).await;
    let handle = res.json::<Value>()["handle"].as_str().unwrap().to_string();
    assert_eq!(handle.len(), 20);
    assert_eq!(handle, "maximilianaconstanti");
}

#[tokio::test]
async fn login_checks_credentials() {
    let server = common::test_server();
    let (u1, _) = common::register_user(&server, "ada@example.com", "Ada", "Lovelace").await;

    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "password1"}))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["authUserId"], u1);

    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "wrongpass"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);

    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "password1"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_revokes_exactly_that_session() {
    let server = common::test_server();
    let (_, token) = common::register_user(&server, "ada@example.com", "Ada", "Lovelace").await;

    // A second session for the same user survives the first one's logout
    let res = server
        .post("/api/auth/login")
        .json(&json!({"email": "ada@example.com", "password": "password1"}))
        .await;
    let second_token = res.json::<Value>()["token"].as_str().unwrap().to_string();

    let (h, v) = common::auth_header(&token);
    server.post("/api/auth/logout").add_header(h, v).await.assert_status_ok();

    let (h, v) = common::auth_header(&token);
    server
        .get("/api/channels")
        .add_header(h, v)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (h, v) = common::auth_header(&second_token);
    server.get("/api/channels").add_header(h, v).await.assert_status_ok();
}

#[tokio::test]
async fn requests_without_valid_token_are_unauthenticated() {
    let server = common::test_server();

    server
        .get("/api/channels")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (h, v) = common::auth_header("bogus-token");
    server
        .get("/api/channels")
        .add_header(h, v)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
