use super::*;

/// Tests reading the configuration written by the fixture.
///
/// Expected: Ok with string IDs parsed into numbers
#[tokio::test]
async fn reads_stored_configuration() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let config = RoleConfigRepository::new(&store).get().await?;

    assert_eq!(config.staff_role_id, Some(STAFF_ROLE_ID));
    assert_eq!(config.leave_role_id, Some(LEAVE_ROLE_ID));
    assert!(config.approver_role_ids.contains(&APPROVER_ROLE_ID));

    Ok(())
}

/// Tests reading without a configuration file.
///
/// Expected: Ok with an empty configuration
#[tokio::test]
async fn missing_file_is_empty_configuration() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let config = RoleConfigRepository::new(&store).get().await?;

    assert_eq!(config, RoleConfig::default());

    Ok(())
}
