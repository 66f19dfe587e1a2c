use super::*;

/// Tests reading the configuration written on disk.
///
/// Expected: Ok with the fixture identifiers
#[tokio::test]
async fn loads_configuration() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let service = RoleConfigService::new(JsonStore::open(test.data_dir()).await?);

    let config = service.get().await?;

    assert_eq!(config.staff_role_id, Some(STAFF_ROLE_ID));
    assert_eq!(config.leave_channel_id, Some(LEAVE_CHANNEL_ID));

    Ok(())
}

/// Tests that reads are served from the cache.
///
/// Expected: a change made by another process is not visible before the cache expires
#[tokio::test]
async fn serves_cached_value() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let service = RoleConfigService::new(JsonStore::open(test.data_dir()).await?);
    service.get().await?;

    RoleConfigFactory::new(&test).leave_role(None).build().unwrap();

    assert_eq!(service.get().await?.leave_role_id, Some(LEAVE_ROLE_ID));

    Ok(())
}

/// Tests reading when no configuration exists yet.
///
/// Expected: Ok with an empty configuration
#[tokio::test]
async fn defaults_when_missing() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let service = RoleConfigService::new(JsonStore::open(test.data_dir()).await?);

    let config = service.get().await?;

    assert_eq!(config.staff_role_id, None);
    assert!(config.approver_role_ids.is_empty());
    assert!(test.read_collection(collection::ROLE_CONFIG).unwrap().is_null());

    Ok(())
}
