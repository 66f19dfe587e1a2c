use super::*;
use crate::server::error::AppError;

/// Tests a successful read-modify-write cycle.
///
/// Verifies that the mutation is persisted as pretty-printed JSON and no temporary
/// file is left behind.
///
/// Expected: Ok with the closure's result and the file rewritten
#[tokio::test]
async fn persists_mutation() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let len = store
        .update(Collection::SweepLedger, |entries: &mut Vec<Value>| {
            entries.push(json!({ "leaveId": "LOA-1" }));
            Ok::<_, StoreError>(entries.len())
        })
        .await?;

    assert_eq!(len, 1);

    let raw = std::fs::read_to_string(test.data_dir().join(collection::SWEEP_LEDGER)).unwrap();
    assert!(raw.contains("\n"));
    assert_eq!(test.read_collection(collection::SWEEP_LEDGER).unwrap()[0]["leaveId"], "LOA-1");

    let leftovers = std::fs::read_dir(test.data_dir())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);

    Ok(())
}

/// Tests a closure that rejects the mutation.
///
/// Verifies that nothing is written when the closure returns an error.
///
/// Expected: Err with the closure's error and the file untouched
#[tokio::test]
async fn aborts_without_writing_on_error() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_collection(collection::SWEEP_LEDGER, json!([{ "leaveId": "LOA-1" }]))
        .build()
        .await
        .unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let result: Result<(), AppError> = store
        .update(Collection::SweepLedger, |entries: &mut Vec<Value>| {
            entries.clear();
            Err(AppError::BadRequest("rejected".to_string()))
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "rejected"));
    assert_eq!(
        test.read_collection(collection::SWEEP_LEDGER)
            .unwrap()
            .as_array()
            .map(|entries| entries.len()),
        Some(1)
    );

    Ok(())
}

/// Tests concurrent updates from one process.
///
/// Verifies that the per-collection lock serializes read-modify-write cycles so no
/// increment is lost.
///
/// Expected: Ok with every update applied
#[tokio::test]
async fn serializes_concurrent_updates() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let tasks: Vec<_> = (0..20)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .update(Collection::Notifications, |entries: &mut Vec<Value>| {
                        entries.push(json!({ "id": n }));
                        Ok::<_, StoreError>(())
                    })
                    .await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap()?;
    }

    let entries: Vec<Value> = store.load(Collection::Notifications).await?;
    assert_eq!(entries.len(), 20);

    Ok(())
}
