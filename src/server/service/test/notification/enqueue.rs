use super::*;

/// Tests appending an envelope to an empty log.
///
/// Expected: true, and the log holds one unprocessed envelope with the payload
#[tokio::test]
async fn appends_unprocessed_envelope() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let queue = NotificationQueue::new(store);

    let written = queue
        .enqueue(kind::LEAVE_STATUS_UPDATE, &json!({ "recordId": "LOA-1" }))
        .await;

    assert!(written);
    let log = test.read_collection(collection::NOTIFICATIONS).unwrap();
    assert_eq!(log.as_array().map(|l| l.len()), Some(1));
    assert_eq!(log[0]["type"], "loa_status_update");
    assert_eq!(log[0]["payload"]["recordId"], "LOA-1");
    assert_eq!(log[0]["processed"], false);

    Ok(())
}

/// Tests that enqueueing keeps envelopes already in the log.
///
/// Expected: both envelopes present in append order
#[tokio::test]
async fn keeps_existing_envelopes() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    EnvelopeFactory::new(&test).id("first").build().unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    NotificationQueue::new(store)
        .enqueue(kind::BOT_STATS_UPDATE, &json!({ "guildCount": 1 }))
        .await;

    let log = test.read_collection(collection::NOTIFICATIONS).unwrap();
    assert_eq!(log[0]["id"], "first");
    assert_eq!(log[1]["type"], "bot_stats_update");

    Ok(())
}

/// Tests enqueueing over an unreadable log.
///
/// The queue never surfaces errors to producers.
///
/// Expected: false, and the corrupt file is left as it was
#[tokio::test]
async fn reports_failure_without_error() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    std::fs::write(test.data_dir().join(collection::NOTIFICATIONS), "{ not json").unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let written = NotificationQueue::new(store)
        .enqueue(kind::LEAVE_EFFECT, &json!({}))
        .await;

    assert!(!written);
    let raw = std::fs::read_to_string(test.data_dir().join(collection::NOTIFICATIONS)).unwrap();
    assert_eq!(raw, "{ not json");

    Ok(())
}
