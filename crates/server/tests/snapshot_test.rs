mod common;

use axum_test::TestServer;
use serde_json::Value;

#[tokio::test]
async fn workspace_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir
        .path()
        .join("streams.json")
        .to_string_lossy()
        .into_owned();

    let server = TestServer::new(common::create_test_app_with_snapshot(&snapshot_path)).unwrap();
    let (_, token) = common::register_user(&server, "ada@example.com", "Ada", "Lovelace").await;
    let channel = common::create_channel(&server, &token, "general", true).await;
    common::send_channel_message(&server, &token, channel, "persisted").await;
    drop(server);

    // A fresh process restores the snapshot, sessions included
    let server = TestServer::new(common::create_test_app_with_snapshot(&snapshot_path)).unwrap();
    let body = common::channel_messages(&server, &token, channel, 0).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["body"], "persisted");
}

#[tokio::test]
async fn id_allocation_resumes_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir
        .path()
        .join("streams.json")
        .to_string_lossy()
        .into_owned();

    let server = TestServer::new(common::create_test_app_with_snapshot(&snapshot_path)).unwrap();
    let (_, token) = common::register_user(&server, "ada@example.com", "Ada", "Lovelace").await;
    let channel = common::create_channel(&server, &token, "general", true).await;
    let first = common::send_channel_message(&server, &token, channel, "before").await;
    drop(server);

    let server = TestServer::new(common::create_test_app_with_snapshot(&snapshot_path)).unwrap();
    let second = common::send_channel_message(&server, &token, channel, "after").await;
    assert!(second > first);

    let body = common::channel_messages(&server, &token, channel, 0).await;
    assert_eq!(body["messages"][0]["body"], "after");
    assert_eq!(body["messages"][1]["body"], "before");
}

#[tokio::test]
async fn removed_records_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir
        .path()
        .join("streams.json")
        .to_string_lossy()
        .into_owned();

    let server = TestServer::new(common::create_test_app_with_snapshot(&snapshot_path)).unwrap();
    let (_, admin_token) = common::register_user(&server, "ada@example.com", "Ada", "Lovelace").await;
    let (u2, _) = common::register_user(&server, "bob@example.com", "Bob", "Byte").await;

    let (h, v) = common::auth_header(&admin_token);
    server
        .delete(&format!("/api/admin/users/{}", u2))
        .add_header(h, v)
        .await
        .assert_status_ok();
    drop(server);

    let server = TestServer::new(common::create_test_app_with_snapshot(&snapshot_path)).unwrap();
    let (h, v) = common::auth_header(&admin_token);
    let res = server.get(&format!("/api/users/{}", u2)).add_header(h, v).await;
    res.assert_status_ok();
    let profile: Value = res.json();
    assert_eq!(profile["nameFirst"], "Removed");
    assert_eq!(profile["handle"], "");
}
