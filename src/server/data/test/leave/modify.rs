use super::*;

/// Tests rewriting a record through the repository.
///
/// Expected: Ok with the change persisted in the active collection file
#[tokio::test]
async fn persists_changes() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let seeded = factory::create_leave_record(&test).unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    LeaveRecordRepository::new(&store)
        .modify(|records| {
            records[0].reason = "Updated".to_string();
            Ok::<_, AppError>(())
        })
        .await?;

    let raw = test.read_collection(collection::ACTIVE_LEAVES).unwrap();
    assert_eq!(raw[0]["id"], seeded["id"]);
    assert_eq!(raw[0]["reason"], "Updated");

    Ok(())
}

/// Tests a rejected modification.
///
/// Verifies that a domain error raised inside the closure leaves the file untouched.
///
/// Expected: Err(LeaveError::NotFound) and no write
#[tokio::test]
async fn leaves_file_untouched_on_error() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_leave_record(&test).unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let result = LeaveRecordRepository::new(&store)
        .modify(|records| {
            records.clear();
            Err::<(), AppError>(LeaveError::NotFound("LOA-X".to_string()).into())
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::LeaveErr(LeaveError::NotFound(_)))
    ));
    assert_eq!(
        test.read_collection(collection::ACTIVE_LEAVES)
            .unwrap()
            .as_array()
            .map(|records| records.len()),
        Some(1)
    );

    Ok(())
}
