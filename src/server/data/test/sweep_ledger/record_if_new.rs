use super::*;

/// Tests recording the same expiry twice.
///
/// Expected: Ok(true) on the first call and Ok(false) on the second
#[tokio::test]
async fn records_each_expiry_once() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = SweepLedgerRepository::new(&store);

    assert!(repo.record_if_new(REQUESTER_ID, "LOA-1", Utc::now()).await?);
    assert!(!repo.record_if_new(REQUESTER_ID, "LOA-1", Utc::now()).await?);
    assert!(repo.record_if_new(REQUESTER_ID, "LOA-2", Utc::now()).await?);

    assert_eq!(repo.all().await?.len(), 2);

    Ok(())
}

/// Tests an expiry recorded by an earlier process.
///
/// Expected: Ok(false)
#[tokio::test]
async fn honours_persisted_entries() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_ledger_entry(&test, REQUESTER_ID, "LOA-1", Utc::now()).unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let recorded = SweepLedgerRepository::new(&store)
        .record_if_new(REQUESTER_ID, "LOA-1", Utc::now())
        .await?;

    assert!(!recorded);

    Ok(())
}
