use super::*;

/// Tests assigning a role to a user who was looked up before.
///
/// Expected: the new role is stored and visible at once despite the cached lookup
#[tokio::test]
async fn stores_role_and_invalidates_cache() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let service = PermissionService::new(JsonStore::open(test.data_dir()).await?);
    assert_eq!(service.role_of(OTHER_STAFF_ID).await?, DashboardRole::User);

    let assigned = service
        .assign(OTHER_STAFF_ID, DashboardRole::Moderator, ADMIN_USER_ID, Utc::now())
        .await?;

    assert_eq!(assigned.assigned_by, Some(ADMIN_USER_ID));
    assert_eq!(
        service.role_of(OTHER_STAFF_ID).await?,
        DashboardRole::Moderator
    );
    let raw = test.read_collection(collection::USER_PERMISSIONS).unwrap();
    assert_eq!(raw[OTHER_STAFF_ID.to_string()]["role"], "moderator");

    Ok(())
}

/// Tests that reassigning keeps the remembered username.
///
/// Expected: the username recorded at login survives the role change
#[tokio::test]
async fn keeps_username() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    factory::create_user_role(&test, REQUESTER_ID, "user").unwrap();
    let service = PermissionService::new(JsonStore::open(test.data_dir()).await?);
    service.remember_username(REQUESTER_ID, "requester").await?;

    let assigned = service
        .assign(REQUESTER_ID, DashboardRole::Administrator, ADMIN_USER_ID, Utc::now())
        .await?;

    assert_eq!(assigned.username.as_deref(), Some("requester"));

    Ok(())
}
