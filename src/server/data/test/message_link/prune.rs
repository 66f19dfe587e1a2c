use super::*;

/// Tests pruning old links.
///
/// Verifies that only links that are both old and detached from an active record are
/// dropped.
///
/// Expected: Ok(1) with the old link of the active record kept
#[tokio::test]
async fn keeps_links_of_active_records() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let now = Utc::now();
    let old = now - Duration::days(100);
    factory::create_message_link(&test, "LOA-GONE", LEAVE_CHANNEL_ID, 1, old).unwrap();
    factory::create_message_link(&test, "LOA-LIVE", LEAVE_CHANNEL_ID, 2, old).unwrap();
    factory::create_message_link(&test, "LOA-FRESH", LEAVE_CHANNEL_ID, 3, now).unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = MessageLinkRepository::new(&store);

    let active: HashSet<String> = ["LOA-LIVE".to_string()].into_iter().collect();
    let pruned = repo.prune(now - Duration::days(90), &active).await?;

    assert_eq!(pruned, 1);
    assert!(repo.find("LOA-GONE").await?.is_none());
    assert!(repo.find("LOA-LIVE").await?.is_some());
    assert!(repo.find("LOA-FRESH").await?.is_some());

    Ok(())
}
