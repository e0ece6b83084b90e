use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use streams_server::{config::Config, routes, store, AppState};

/// Build a test app over a fresh workspace with a throwaway snapshot path.
pub fn create_test_app() -> Router {
    let snapshot_path = std::env::temp_dir()
        .join(format!("streams-test-{}.json", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    create_test_app_with_snapshot(&snapshot_path)
}

/// Build a test app that restores from (and persists to) `snapshot_path`.
pub fn create_test_app_with_snapshot(snapshot_path: &str) -> Router {
    let workspace = store::load_snapshot(snapshot_path).unwrap();
    let state = Arc::new(AppState::new(
        Config {
            host: "127.0.0.1".into(),
            port: 0,
            snapshot_path: snapshot_path.to_string(),
        },
        workspace,
    ));
    routes::build_router(state)
}

pub fn test_server() -> TestServer {
    TestServer::new(create_test_app()).unwrap()
}

pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        format!("Bearer {}", token).parse().unwrap(),
    )
}

/// Register a user through the API. Returns (user_id, token).
pub async fn register_user(
    server: &TestServer,
    email: &str,
    name_first: &str,
    name_last: &str,
) -> (i64, String) {
    let res = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "password1",
            "nameFirst": name_first,
            "nameLast": name_last,
        }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    (
        body["authUserId"].as_i64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

pub async fn create_channel(server: &TestServer, token: &str, name: &str, is_public: bool) -> i64 {
    let (h, v) = auth_header(token);
    let res = server
        .post("/api/channels")
        .add_header(h, v)
        .json(&json!({ "name": name, "isPublic": is_public }))
        .await;
    res.assert_status_ok();
    res.json::<Value>()["channelId"].as_i64().unwrap()
}

pub async fn create_dm(server: &TestServer, token: &str, user_ids: &[i64]) -> i64 {
    let (h, v) = auth_header(token);
    let res = server
        .post("/api/dms")
        .add_header(h, v)
        .json(&json!({ "userIds": user_ids }))
        .await;
    res.assert_status_ok();
    res.json::<Value>()["dmId"].as_i64().unwrap()
}

pub async fn send_channel_message(
    server: &TestServer,
    token: &str,
    channel_id: i64,
    body: &str,
) -> i64 {
    let (h, v) = auth_header(token);
    let res = server
        .post(&format!("/api/channels/{}/messages", channel_id))
        .add_header(h, v)
        .json(&json!({ "body": body }))
        .await;
    res.assert_status_ok();
    res.json::<Value>()["messageId"].as_i64().unwrap()
}

pub async fn send_dm_message(server: &TestServer, token: &str, dm_id: i64, body: &str) -> i64 {
    let (h, v) = auth_header(token);
    let res = server
        .post(&format!("/api/dms/{}/messages", dm_id))
        .add_header(h, v)
        .json(&json!({ "body": body }))
        .await;
    res.assert_status_ok();
    res.json::<Value>()["messageId"].as_i64().unwrap()
}

pub async fn channel_messages(server: &TestServer, token: &str, channel_id: i64, start: i64) -> Value {
    let (h, v) = auth_header(token);
    let res = server
        .get(&format!("/api/channels/{}/messages?start={}", channel_id, start))
        .add_header(h, v)
        .await;
    res.assert_status_ok();
    res.json()
}

pub async fn dm_messages(server: &TestServer, token: &str, dm_id: i64, start: i64) -> Value {
    let (h, v) = auth_header(token);
    let res = server
        .get(&format!("/api/dms/{}/messages?start={}", dm_id, start))
        .add_header(h, v)
        .await;
    res.assert_status_ok();
    res.json()
}

pub async fn notifications(server: &TestServer, token: &str) -> Value {
    let (h, v) = auth_header(token);
    let res = server.get("/api/notifications").add_header(h, v).await;
    res.assert_status_ok();
    res.json::<Value>()["notifications"].clone()
}
