use homebase::{Client, InMemory, SignUpOptions, UserMetadata};

/// Client over a fresh, healthy in-memory medium.
pub async fn test_client() -> Client {
    Client::open(Box::new(InMemory::new())).await
}

/// Client over a medium that is unavailable from the start.
pub async fn degraded_client() -> Client {
    let storage = InMemory::new();
    storage.set_available(false);
    Client::open(Box::new(storage)).await
}

/// Sign-up payload with a filled-in learning profile.
pub fn profile(username: &str) -> SignUpOptions {
    SignUpOptions {
        username: username.to_string(),
        metadata: UserMetadata {
            learning_speed: "steady".to_string(),
            preferred_learning_style: "visual".to_string(),
            daily_goal: 3,
        },
    }
}
