use super::*;

/// Tests seeding a fresh data directory.
///
/// Expected: Ok(true) with the seed persisted
#[tokio::test]
async fn seeds_fresh_directory() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = RoleConfigRepository::new(&store);

    let seed = RoleConfig {
        leave_role_id: Some(LEAVE_ROLE_ID),
        ..Default::default()
    };

    assert!(repo.seed_if_missing(&seed).await?);
    assert_eq!(repo.get().await?, seed);

    Ok(())
}

/// Tests seeding when a configuration file already exists.
///
/// Verifies that the stored file stays authoritative over environment values.
///
/// Expected: Ok(false) with the stored configuration unchanged
#[tokio::test]
async fn keeps_existing_configuration() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = RoleConfigRepository::new(&store);

    let seeded = repo.seed_if_missing(&RoleConfig::default()).await?;

    assert!(!seeded);
    assert_eq!(repo.get().await?.staff_role_id, Some(STAFF_ROLE_ID));

    Ok(())
}
