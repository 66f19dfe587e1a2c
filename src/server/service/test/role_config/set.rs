use super::*;

/// Tests replacing the configuration through the service.
///
/// Expected: the file is rewritten and the next read sees the new value immediately
#[tokio::test]
async fn invalidates_cache() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let service = RoleConfigService::new(JsonStore::open(test.data_dir()).await?);
    let mut config = service.get().await?;

    config.leave_role_id = None;
    service.set(config).await?;

    assert_eq!(service.get().await?.leave_role_id, None);
    let raw = test.read_collection(collection::ROLE_CONFIG).unwrap();
    assert!(raw.get("leaveRoleId").is_none());
    assert_eq!(raw["staffRoleId"], STAFF_ROLE_ID.to_string());

    Ok(())
}
