use super::*;

/// Tests loading a collection whose file does not exist.
///
/// Expected: Ok with the default (empty) value
#[tokio::test]
async fn missing_file_yields_default() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let records: Vec<Value> = store.load(Collection::ActiveLeaves).await?;

    assert!(records.is_empty());
    assert!(!store.exists(Collection::ActiveLeaves).await);

    Ok(())
}

/// Tests loading a collection written by another process.
///
/// Verifies that the store reads the same file names the factories write.
///
/// Expected: Ok with the written entries
#[tokio::test]
async fn reads_existing_collection() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_collection(collection::NOTIFICATIONS, json!([{ "id": "a" }, { "id": "b" }]))
        .build()
        .await
        .unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let entries: Vec<Value> = store.load(Collection::Notifications).await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["id"], "b");

    Ok(())
}

/// Tests loading a collection file holding invalid JSON.
///
/// Expected: Err(StoreError::Serde) naming the collection
#[tokio::test]
async fn fails_on_corrupt_file() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    std::fs::write(test.data_dir().join(collection::ACTIVE_LEAVES), "{ not json").unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let result = store.load::<Vec<Value>>(Collection::ActiveLeaves).await;

    assert!(matches!(
        result,
        Err(StoreError::Serde { collection: "active-loas.json", .. })
    ));

    Ok(())
}
