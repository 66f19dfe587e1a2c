use super::*;

/// Tests assigning a dashboard role.
///
/// Expected: Ok with the assignment readable back
#[tokio::test]
async fn stores_assignment() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let store = JsonStore::open(test.data_dir()).await?;
    let repo = UserPermissionRepository::new(&store);

    repo.set(
        REQUESTER_ID,
        UserPermission {
            role: DashboardRole::Moderator,
            username: Some("Requester".to_string()),
            assigned_by: Some(ADMIN_USER_ID),
            assigned_at: Utc::now(),
        },
    )
    .await?;

    let stored = repo.find(REQUESTER_ID).await?.unwrap();
    assert_eq!(stored.role, DashboardRole::Moderator);
    assert_eq!(stored.assigned_by, Some(ADMIN_USER_ID));

    Ok(())
}

/// Tests reading an assignment written in the on-disk format.
///
/// Expected: Ok(Some) with the administrator role
#[tokio::test]
async fn reads_factory_assignment() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_user_role(&test, APPROVER_ID, "administrator").unwrap();
    let store = JsonStore::open(test.data_dir()).await?;

    let stored = UserPermissionRepository::new(&store)
        .find(APPROVER_ID)
        .await?;

    assert_eq!(stored.map(|p| p.role), Some(DashboardRole::Administrator));

    Ok(())
}
