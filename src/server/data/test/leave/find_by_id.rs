use super::*;

/// Tests finding a record written in the on-disk format.
///
/// Verifies that string IDs, camelCase fields and the tagged status parse into the
/// domain model.
///
/// Expected: Ok(Some) with the approved record
#[tokio::test]
async fn finds_existing_record() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::leave_record::LeaveRecordFactory::new(&test)
        .id("LOA-ABC")
        .requester(REQUESTER_ID, "Requester")
        .approved_by(APPROVER_ID)
        .build()
        .unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let record = LeaveRecordRepository::new(&store)
        .find_by_id("LOA-ABC")
        .await?
        .unwrap();

    assert_eq!(record.user_id, REQUESTER_ID);
    assert_eq!(record.username, "Requester");
    assert!(matches!(record.status, LeaveStatus::Approved(ref d) if d.by == APPROVER_ID));

    Ok(())
}

/// Tests finding an ID that is not in the active collection.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_leave_record(&test).unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let record = LeaveRecordRepository::new(&store)
        .find_by_id("LOA-MISSING")
        .await?;

    assert!(record.is_none());

    Ok(())
}
