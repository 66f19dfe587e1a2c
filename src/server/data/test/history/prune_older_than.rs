use super::*;

/// Tests pruning archived records by removal time.
///
/// Expected: Ok(1) with only the recent record kept
#[tokio::test]
async fn drops_records_removed_before_cutoff() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let now = Utc::now();
    factory::leave_record::LeaveRecordFactory::new(&test)
        .id("LOA-OLD")
        .removed("expired", now - Duration::days(120))
        .build()
        .unwrap();
    factory::leave_record::LeaveRecordFactory::new(&test)
        .id("LOA-NEW")
        .removed("early_return", now - Duration::days(5))
        .build()
        .unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = LeaveHistoryRepository::new(&store);

    let pruned = repo.prune_older_than(now - Duration::days(90)).await?;

    assert_eq!(pruned, 1);
    let history = repo.all().await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, "LOA-NEW");

    Ok(())
}
