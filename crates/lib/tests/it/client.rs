use std::time::Duration;

use homebase::{Client, JsonFile};
use serde_json::json;

use crate::helpers::{degraded_client, profile};

#[tokio::test]
async fn degraded_client_reads_empty_and_never_panics() {
    let client = degraded_client().await;

    assert_eq!(client.session().await.user, None);
    assert_eq!(client.user().await, None);
    assert!(client.table("events").await.select().await.is_empty());
    client.sign_out().await;
    client.log_event("boot", json!({})).await;
}

#[tokio::test]
async fn degraded_client_answers_writes_with_unavailable() {
    let client = degraded_client().await;

    let err = client.sign_in("ada@example.com", "pw").await.unwrap_err();
    assert!(err.is_unavailable());

    let err = client
        .sign_up("ada@example.com", "pw", profile("ada"))
        .await
        .unwrap_err();
    assert!(err.is_unavailable());

    let err = client
        .table("events")
        .await
        .insert(vec![json!({"a": 1})])
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn degraded_subscription_handle_is_inert() {
    let client = degraded_client().await;

    let sub = client.on_auth_state_change(|_, _| panic!("must never fire"));
    client.sign_out().await;
    sub.unsubscribe();
}

#[tokio::test]
async fn rate_limiting_works_even_when_degraded() {
    let client = degraded_client().await;
    let window = Duration::from_secs(60);

    assert!(client.check_rate_limit("signin", 3, window));
    assert!(client.check_rate_limit("signin", 3, window));
    assert!(client.check_rate_limit("signin", 3, window));
    assert!(!client.check_rate_limit("signin", 3, window));
}

#[tokio::test]
async fn session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homebase.json");

    let created = {
        let client = Client::open(Box::new(JsonFile::open(&path))).await;
        client
            .sign_up("ada@example.com", "hunter2", profile("ada"))
            .await
            .unwrap()
    };

    let client = Client::open(Box::new(JsonFile::open(&path))).await;
    assert_eq!(client.session().await.user, Some(created.clone()));

    // Credentials keep working across the restart as well.
    client.sign_out().await;
    let returned = client.sign_in("ada@example.com", "hunter2").await.unwrap();
    assert_eq!(returned.id, created.id);
}

#[tokio::test]
async fn sign_out_before_restart_stays_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homebase.json");

    {
        let client = Client::open(Box::new(JsonFile::open(&path))).await;
        client
            .sign_up("ada@example.com", "hunter2", profile("ada"))
            .await
            .unwrap();
        client.sign_out().await;
    }

    let client = Client::open(Box::new(JsonFile::open(&path))).await;
    assert_eq!(client.session().await.user, None);
}

#[tokio::test]
async fn clones_share_one_state() {
    let client = crate::helpers::test_client().await;
    let clone = client.clone();

    clone
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();
    assert!(client.session().await.user.is_some());
}
