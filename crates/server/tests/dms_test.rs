mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_dm_freezes_sorted_handle_name() {
    let server = common::test_server();
    let (_, bob_token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (ann, _) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;

    let dm = common::create_dm(&server, &bob_token, &[ann]).await;

    let (h, v) = common::auth_header(&bob_token);
    let res = server.get(&format!("/api/dms/{}", dm)).add_header(h, v).await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["name"], "annace, bobzed");
    assert_eq!(body["members"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_dm_validates_user_ids() {
    let server = common::test_server();
    let (u1, token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (u2, _) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;

    for invited in [json!([u2, u2]), json!([999]), json!([u1])] {
        let (h, v) = common::auth_header(&token);
        server
            .post("/api/dms")
            .add_header(h, v)
            .json(&json!({ "userIds": invited }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn dm_details_and_list_are_member_scoped() {
    let server = common::test_server();
    let (_, bob_token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (ann, ann_token) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;
    let (_, outsider_token) = common::register_user(&server, "cat@example.com", "Cat", "Code").await;

    let dm = common::create_dm(&server, &bob_token, &[ann]).await;

    let (h, v) = common::auth_header(&outsider_token);
    server
        .get(&format!("/api/dms/{}", dm))
        .add_header(h, v)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (h, v) = common::auth_header(&bob_token);
    server
        .get("/api/dms/999")
        .add_header(h, v)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let (h, v) = common::auth_header(&ann_token);
    let res = server.get("/api/dms").add_header(h, v).await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 1);

    let (h, v) = common::auth_header(&outsider_token);
    let res = server.get("/api/dms").add_header(h, v).await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn leave_dm_keeps_it_alive() {
    let server = common::test_server();
    let (_, bob_token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (ann, ann_token) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;

    let dm = common::create_dm(&server, &bob_token, &[ann]).await;

    // The owner leaves; the DM survives with the frozen name
    let (h, v) = common::auth_header(&bob_token);
    server
        .post(&format!("/api/dms/{}/leave", dm))
        .add_header(h, v)
        .await
        .assert_status_ok();

    let (h, v) = common::auth_header(&ann_token);
    let res = server.get(&format!("/api/dms/{}", dm)).add_header(h, v).await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["name"], "annace, bobzed");
    assert_eq!(body["members"].as_array().unwrap().len(), 1);

    let (h, v) = common::auth_header(&bob_token);
    server
        .get(&format!("/api/dms/{}", dm))
        .add_header(h, v)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_who_left_cannot_remove() {
    let server = common::test_server();
    let (_, bob_token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (ann, _) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;

    let dm = common::create_dm(&server, &bob_token, &[ann]).await;

    let (h, v) = common::auth_header(&bob_token);
    server
        .post(&format!("/api/dms/{}/leave", dm))
        .add_header(h, v)
        .await
        .assert_status_ok();

    // Leaving struck the owner bit too
    let (h, v) = common::auth_header(&bob_token);
    server
        .delete(&format!("/api/dms/{}", dm))
        .add_header(h, v)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn remove_dm_is_owner_only() {
    let server = common::test_server();
    let (_, bob_token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (ann, ann_token) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;

    let dm = common::create_dm(&server, &bob_token, &[ann]).await;

    let (h, v) = common::auth_header(&ann_token);
    server
        .delete(&format!("/api/dms/{}", dm))
        .add_header(h, v)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn remove_dm_cascades() {
    let server = common::test_server();
    let (_, bob_token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (ann, ann_token) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;

    let dm = common::create_dm(&server, &bob_token, &[ann]).await;
    let message = common::send_dm_message(&server, &ann_token, dm, "soon gone").await;

    let (h, v) = common::auth_header(&bob_token);
    server
        .delete(&format!("/api/dms/{}", dm))
        .add_header(h, v)
        .await
        .assert_status_ok();

    // The DM and its messages stop resolving
    let (h, v) = common::auth_header(&bob_token);
    server
        .get(&format!("/api/dms/{}", dm))
        .add_header(h, v)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let (h, v) = common::auth_header(&ann_token);
    server
        .patch(&format!("/api/messages/{}", message))
        .add_header(h, v)
        .json(&json!({ "body": "too late" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let (h, v) = common::auth_header(&ann_token);
    let res = server.get("/api/dms").add_header(h, v).await;
    assert_eq!(res.json::<Value>().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn dm_messages_flow() {
    let server = common::test_server();
    let (_, bob_token) = common::register_user(&server, "bob@example.com", "Bob", "Zed").await;
    let (ann, ann_token) = common::register_user(&server, "ann@example.com", "Ann", "Ace").await;

    let dm = common::create_dm(&server, &bob_token, &[ann]).await;
    common::send_dm_message(&server, &bob_token, dm, "first").await;
    common::send_dm_message(&server, &ann_token, dm, "second").await;

    let body = common::dm_messages(&server, &bob_token, dm, 0).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["body"], "second");
    assert_eq!(messages[1]["body"], "first");
    assert_eq!(body["end"], -1);
}
