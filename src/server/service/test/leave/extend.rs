use super::*;

fn extension(leave_id: &str, new_end: NaiveDate) -> ExtendLeaveParam {
    ExtendLeaveParam {
        leave_id: leave_id.to_string(),
        new_end_date: new_end.format("%Y-%m-%d").to_string(),
        reason: "Flight delayed".to_string(),
    }
}

/// Tests extending one's own approved leave.
///
/// Expected: Ok with the new end date stored, an extension notice posted and an
/// administrator notified
#[tokio::test]
async fn moves_end_date() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = factory::create_approved_leave(
        &test,
        REQUESTER_ID,
        days_from_today(0),
        days_from_today(3),
        APPROVER_ID,
    )
    .unwrap();
    let leave_id = seeded["id"].as_str().unwrap();
    let harness = Harness::new(&test).await?;

    let extended = harness
        .service()
        .extend(
            &staff(REQUESTER_ID),
            extension(leave_id, days_from_today(6)),
            Utc::now(),
        )
        .await?;

    assert_eq!(extended.end_date, days_from_today(6));
    assert!(extended.status.is_approved());

    let posts = harness.platform.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, LEAVE_CHANNEL_ID);
    assert_eq!(posts[0].1.field_value("Extension Reason"), Some("Flight delayed"));
    assert_eq!(harness.platform.direct_messages_to(ADMIN_USER_ID).len(), 1);

    Ok(())
}

/// Tests an end date that does not move the leave forward.
///
/// Expected: Err(InvalidRange) carrying the current end date
#[tokio::test]
async fn rejects_earlier_or_equal_end() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = LeaveRecordFactory::new(&test)
        .requester(REQUESTER_ID, "Requester")
        .dates(days_from_today(1), days_from_today(5))
        .build()
        .unwrap();
    let leave_id = seeded["id"].as_str().unwrap();
    let harness = Harness::new(&test).await?;
    let service = harness.service();

    for new_end in [days_from_today(5), days_from_today(3)] {
        let result = service
            .extend(&staff(REQUESTER_ID), extension(leave_id, new_end), Utc::now())
            .await;

        match result {
            Err(AppError::LeaveErr(LeaveError::InvalidRange { current_end })) => {
                assert_eq!(current_end, days_from_today(5))
            }
            other => panic!("expected invalid range, got {:?}", other),
        }
    }
    assert!(harness.platform.calls().is_empty());

    Ok(())
}

/// Tests extending someone else's leave.
///
/// Expected: Err(Forbidden) and the record unchanged
#[tokio::test]
async fn rejects_other_requester() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = factory::create_approved_leave(
        &test,
        REQUESTER_ID,
        days_from_today(1),
        days_from_today(3),
        APPROVER_ID,
    )
    .unwrap();
    let harness = Harness::new(&test).await?;

    let result = harness
        .service()
        .extend(
            &staff(OTHER_STAFF_ID),
            extension(seeded["id"].as_str().unwrap(), days_from_today(9)),
            Utc::now(),
        )
        .await;

    assert!(matches!(result, Err(AppError::LeaveErr(LeaveError::Forbidden))));
    let raw = test.read_collection(collection::ACTIVE_LEAVES).unwrap();
    assert_eq!(raw[0]["endDate"], seeded["endDate"]);

    Ok(())
}

/// Tests extending a denied request.
///
/// Expected: Err(Validation)
#[tokio::test]
async fn rejects_denied_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = LeaveRecordFactory::new(&test)
        .requester(REQUESTER_ID, "Requester")
        .denied_by(APPROVER_ID)
        .build()
        .unwrap();
    let harness = Harness::new(&test).await?;

    let result = harness
        .service()
        .extend(
            &staff(REQUESTER_ID),
            extension(seeded["id"].as_str().unwrap(), days_from_today(30)),
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::LeaveErr(LeaveError::Validation(_)))
    ));

    Ok(())
}

/// Tests extending an unknown record.
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
        .extend(
            &staff(REQUESTER_ID),
            extension("LOA-NOPE", days_from_today(4)),
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::LeaveErr(LeaveError::NotFound(_)))
    ));

    Ok(())
}

/// Tests extending a private leave.
///
/// Expected: Ok with no channel post, only the administrator DM
#[tokio::test]
async fn private_extension_is_not_posted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = LeaveRecordFactory::new(&test)
        .requester(REQUESTER_ID, "Requester")
        .dates(days_from_today(1), days_from_today(2))
        .private(true)
        .build()
        .unwrap();
    let harness = Harness::new(&test).await?;

    harness
        .service()
        .extend(
            &staff(REQUESTER_ID),
            extension(seeded["id"].as_str().unwrap(), days_from_today(4)),
            Utc::now(),
        )
        .await?;

    assert!(harness.platform.posts().is_empty());
    assert_eq!(harness.platform.direct_messages_to(ADMIN_USER_ID).len(), 1);

    Ok(())
}
