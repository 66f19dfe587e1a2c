use super::*;

/// Tests the role of a user with an assignment.
///
/// Expected: the assigned role
#[tokio::test]
async fn returns_assigned_role() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_user_role(&test, ADMIN_USER_ID, "administrator").unwrap();
    let service = PermissionService::new(JsonStore::open(test.data_dir()).await?);

    assert_eq!(
        service.role_of(ADMIN_USER_ID).await?,
        DashboardRole::Administrator
    );

    Ok(())
}

/// Tests the role of a user nobody assigned a role to.
///
/// Expected: `User`
#[tokio::test]
async fn defaults_to_user() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let service = PermissionService::new(JsonStore::open(test.data_dir()).await?);

    assert_eq!(service.role_of(REQUESTER_ID).await?, DashboardRole::User);

    Ok(())
}
