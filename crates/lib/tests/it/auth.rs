use std::sync::{Arc, Mutex};

use crate::helpers::{profile, test_client};

#[tokio::test]
async fn sign_up_round_trips_through_the_session() {
    let client = test_client().await;

    let user = client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();

    let session = client.session().await;
    assert_eq!(session.user, Some(user.clone()));
    assert_eq!(client.user().await, Some(user));
}

#[tokio::test]
async fn returning_user_keeps_their_id() {
    let client = test_client().await;

    let created = client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();
    client.sign_out().await;

    let returned = client.sign_in("ada@example.com", "hunter2").await.unwrap();
    assert_eq!(returned.id, created.id);
    assert_eq!(returned.metadata, created.metadata);
}

#[tokio::test]
async fn second_sign_up_with_same_email_is_a_conflict() {
    let client = test_client().await;

    client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();
    let err = client
        .sign_up("ada@example.com", "other-pw", profile("impostor"))
        .await
        .unwrap_err();

    assert!(err.is_duplicate());
    assert_eq!(err.module(), "auth");
}

#[tokio::test]
async fn unknown_email_is_not_found() {
    let client = test_client().await;

    let err = client
        .sign_in("nobody@example.com", "pw")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn blank_credentials_are_rejected_before_lookup() {
    let client = test_client().await;

    assert!(client.sign_in("", "").await.unwrap_err().is_validation_error());
    assert!(
        client
            .sign_up("", "pw", profile("ada"))
            .await
            .unwrap_err()
            .is_validation_error()
    );
}

#[tokio::test]
async fn double_sign_out_is_harmless() {
    let client = test_client().await;

    client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();

    client.sign_out().await;
    assert_eq!(client.session().await.user, None);
    client.sign_out().await;
    assert_eq!(client.session().await.user, None);
}

#[tokio::test]
async fn subscribers_see_transitions_in_registration_order() {
    let client = test_client().await;
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let subs: Vec<_> = ["first", "second", "third"]
        .into_iter()
        .map(|tag| {
            let log = log.clone();
            client.on_auth_state_change(move |event, session| {
                log.lock()
                    .unwrap()
                    .push(format!("{tag}:{event}:{}", session.user.is_some()));
            })
        })
        .collect();

    client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "first:SIGNED_IN:true",
            "second:SIGNED_IN:true",
            "third:SIGNED_IN:true",
        ]
    );

    for sub in subs {
        sub.unsubscribe();
    }
}

#[tokio::test]
async fn unsubscribed_listener_misses_the_sign_out() {
    let client = test_client().await;
    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let events_cb = events.clone();
    let sub = client.on_auth_state_change(move |event, _| {
        events_cb.lock().unwrap().push(event.as_str().to_string());
    });

    client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();
    sub.unsubscribe();
    client.sign_out().await;

    assert_eq!(*events.lock().unwrap(), vec!["SIGNED_IN"]);
}

#[tokio::test]
async fn preferences_update_is_visible_to_subscribers_and_session() {
    let client = test_client().await;
    let goals: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));

    client
        .sign_up("ada@example.com", "hunter2", profile("ada"))
        .await
        .unwrap();

    let goals_cb = goals.clone();
    let _sub = client.on_auth_state_change(move |_, session| {
        if let Some(user) = &session.user {
            goals_cb.lock().unwrap().push(user.metadata.daily_goal);
        }
    });

    let mut metadata = client.user().await.unwrap().metadata;
    metadata.daily_goal = 10;
    let updated = client.update_user_metadata(metadata).await.unwrap();

    assert_eq!(updated.metadata.daily_goal, 10);
    assert_eq!(client.user().await.unwrap().metadata.daily_goal, 10);
    assert_eq!(*goals.lock().unwrap(), vec![10]);
}
