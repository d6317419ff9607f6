use serde_json::json;

use crate::helpers::{degraded_client, profile, test_client};

#[tokio::test]
async fn events_land_in_the_analytics_table() {
    let client = test_client().await;

    client
        .log_event("lesson_started", json!({"lesson": "intro"}))
        .await;

    let rows = client.table("analytics").await.select().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["event"], "lesson_started");
    assert_eq!(rows[0]["data"]["lesson"], "intro");
    assert!(rows[0]["user_id"].is_null());
    assert!(rows[0]["timestamp"].is_string());
}

#[tokio::test]
async fn events_are_tagged_with_the_signed_in_user() {
    let client = test_client().await;

    let user = client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();
    client.log_event("lesson_completed", json!({})).await;

    let rows = client.table("analytics").await.select().await;
    assert_eq!(rows[0]["user_id"], json!(user.id));
}

#[tokio::test]
async fn events_after_sign_out_are_anonymous_again() {
    let client = test_client().await;

    client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();
    client.sign_out().await;
    client.log_event("page_view", json!({"page": "landing"})).await;

    let rows = client.table("analytics").await.select().await;
    assert!(rows[0]["user_id"].is_null());
}

#[tokio::test]
async fn degraded_logging_is_silently_dropped() {
    let client = degraded_client().await;

    client.log_event("lesson_started", json!({})).await;
    assert!(client.table("analytics").await.select().await.is_empty());
}
