use super::*;

/// Tests deleting an approved record from the dashboard.
///
/// Expected: Ok; the record moves to history as deleted, the announcement is deleted,
/// the granted role revoked and the requester notified
#[tokio::test]
async fn removes_record_and_cleans_up() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = LeaveRecordFactory::new(&test)
        .requester(REQUESTER_ID, "Requester")
        .approved_by(APPROVER_ID)
        .granted_role(LEAVE_ROLE_ID)
        .build()
        .unwrap();
    let leave_id = seeded["id"].as_str().unwrap();
    factory::create_message_link(&test, leave_id, LEAVE_CHANNEL_ID, 4242, Utc::now()).unwrap();
    let harness = Harness::new(&test).await?;
    let admin = Actor::dashboard(ADMIN_USER_ID, "Admin", DashboardRole::Administrator);

    let removed = harness
        .service()
        .delete(&admin, leave_id, Utc::now())
        .await?;

    assert_eq!(removed.id, leave_id);
    assert_eq!(active_count(&test), 0);
    let history = test.read_collection(collection::LEAVE_HISTORY).unwrap();
    assert_eq!(history[0]["status"]["reason"], "deleted");

    assert!(harness.platform.calls().contains(
        &PlatformCall::Delete {
            channel_id: LEAVE_CHANNEL_ID,
            message_id: 4242,
        }
    ));
    assert!(MessageLinkRepository::new(&harness.store)
        .find(leave_id)
        .await?
        .is_none());
    assert_eq!(harness.platform.revokes(), vec![(REQUESTER_ID, LEAVE_ROLE_ID)]);
    assert_eq!(harness.platform.direct_messages_to(REQUESTER_ID).len(), 1);

    Ok(())
}

/// Tests deleting a pending record.
///
/// Expected: Ok with no revocation, since nothing was granted
#[tokio::test]
async fn pending_record_revokes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = factory::create_leave_record(&test).unwrap();
    let harness = Harness::new(&test).await?;

    harness
        .service()
        .delete(
            &approver(APPROVER_ID),
            seeded["id"].as_str().unwrap(),
            Utc::now(),
        )
        .await?;

    assert!(harness.platform.revokes().is_empty());

    Ok(())
}

/// Tests deletion by a regular staff member.
///
/// Expected: Err(Unauthorized) and the record kept
#[tokio::test]
async fn rejects_non_approver() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = factory::create_leave_record(&test).unwrap();
    let harness = Harness::new(&test).await?;

    let result = harness
        .service()
        .delete(
            &staff(REQUESTER_ID),
            seeded["id"].as_str().unwrap(),
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::LeaveErr(LeaveError::Unauthorized))
    ));
    assert_eq!(active_count(&test), 1);

    Ok(())
}

/// Tests deletion of an unknown record.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_unknown_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let harness = Harness::new(&test).await?;

    let result = harness
        .service()
        .delete(&approver(APPROVER_ID), "LOA-GONE", Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::LeaveErr(LeaveError::NotFound(_)))
    ));

    Ok(())
}

/// Tests deleting a finished record while another leave of the user holds the role.
///
/// Expected: Ok with the record removed and the role left in place
#[tokio::test]
async fn keeps_role_held_by_another_leave() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    LeaveRecordFactory::new(&test)
        .id("LOA-OLD")
        .requester(REQUESTER_ID, "Requester")
        .dates(days_from_today(-6), days_from_today(-1))
        .approved_by(APPROVER_ID)
        .granted_role(LEAVE_ROLE_ID)
        .build()
        .unwrap();
    LeaveRecordFactory::new(&test)
        .id("LOA-NEW")
        .requester(REQUESTER_ID, "Requester")
        .dates(days_from_today(0), days_from_today(4))
        .approved_by(APPROVER_ID)
        .granted_role(LEAVE_ROLE_ID)
        .build()
        .unwrap();
    let harness = Harness::new(&test).await?;

    harness
        .service()
        .delete(&approver(APPROVER_ID), "LOA-OLD", Utc::now())
        .await?;

    assert_eq!(active_count(&test), 1);
    assert!(harness.platform.revokes().is_empty());

    Ok(())
}
