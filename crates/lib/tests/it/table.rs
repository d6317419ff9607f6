use std::sync::Arc;

use homebase::{Client, JsonFile, Storage, TableStore, constants};
use serde_json::json;

use crate::helpers::test_client;

#[tokio::test]
async fn inserted_rows_come_back_in_order() {
    let client = test_client().await;
    let table = client.table("events").await;

    table.insert(vec![json!({"a": 1})]).await.unwrap();
    table
        .insert(vec![json!({"a": 2}), json!({"a": 3})])
        .await
        .unwrap();

    assert_eq!(
        table.select().await,
        vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})]
    );
}

#[tokio::test]
async fn rows_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homebase.json");

    {
        let client = Client::open(Box::new(JsonFile::open(&path))).await;
        client
            .table("events")
            .await
            .insert(vec![json!({"a": 1})])
            .await
            .unwrap();
    }

    let client = Client::open(Box::new(JsonFile::open(&path))).await;
    assert_eq!(
        client.table("events").await.select().await,
        vec![json!({"a": 1})]
    );
}

#[tokio::test]
async fn first_access_persists_an_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homebase.json");

    {
        let client = Client::open(Box::new(JsonFile::open(&path))).await;
        client.table("events").await;
    }

    // A restart sees the collection as existing, not absent.
    let storage = JsonFile::open(&path);
    let key = format!("{}events", constants::TABLE_PREFIX);
    assert_eq!(storage.get(&key), Some("[]".to_string()));
}

#[tokio::test]
async fn store_handles_are_independent_of_the_client() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("homebase.json");

    {
        let store = TableStore::new(Arc::new(JsonFile::open(&path)));
        let table = store.table("notifications").await;
        table
            .insert(vec![json!({"message": "welcome"})])
            .await
            .unwrap();
    }

    let store = TableStore::new(Arc::new(JsonFile::open(&path)));
    let rows = store.table("notifications").await.select().await;
    assert_eq!(rows, vec![json!({"message": "welcome"})]);
}

#[tokio::test]
async fn whole_collection_writes_are_last_write_wins() {
    let client = test_client().await;
    let table = client.table("events").await;

    table.insert(vec![json!(1), json!(2)]).await.unwrap();
    let snapshot = table.select().await;
    assert_eq!(snapshot.len(), 2);

    // A second writer appending through the same handle sees both rows.
    table.insert(vec![json!(3)]).await.unwrap();
    assert_eq!(table.select().await.len(), 3);
}
