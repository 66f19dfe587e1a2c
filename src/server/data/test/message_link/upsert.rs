use super::*;

/// Tests storing and replacing an announcement link.
///
/// Expected: Ok with the latest message ID stored as a string
#[tokio::test]
async fn replaces_existing_link() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_message_link(&test, "LOA-1", LEAVE_CHANNEL_ID, 1, Utc::now()).unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = MessageLinkRepository::new(&store);

    repo.upsert(
        "LOA-1",
        MessageLink {
            channel_id: LEAVE_CHANNEL_ID,
            message_id: 2,
            created_at: Utc::now(),
        },
    )
    .await?;

    let link = repo.find("LOA-1").await?.unwrap();
    assert_eq!(link.message_id, 2);
    assert_eq!(
        test.read_collection(collection::MESSAGE_LINKS).unwrap()["LOA-1"]["messageId"],
        "2"
    );

    Ok(())
}

/// Tests removing a link.
///
/// Expected: Ok(Some) on the first call and Ok(None) afterwards
#[tokio::test]
async fn remove_returns_link_once() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_message_link(&test, "LOA-1", LEAVE_CHANNEL_ID, 7, Utc::now()).unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = MessageLinkRepository::new(&store);

    assert_eq!(repo.remove("LOA-1").await?.map(|l| l.message_id), Some(7));
    assert!(repo.remove("LOA-1").await?.is_none());

    Ok(())
}
