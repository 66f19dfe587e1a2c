use super::*;

/// Tests requesting changes on a pending request.
///
/// Expected: Ok with the comment stored, status untouched, announcement edited with the
/// comment and the requester notified
#[tokio::test]
async fn appends_comment_and_notifies() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let harness = Harness::new(&test).await?;
    let service = harness.service();
    let record = service
        .submit(
            &staff(REQUESTER_ID),
            request(days_from_today(1), days_from_today(3)),
            Utc::now(),
        )
        .await?;

    let updated = service
        .request_changes(
            &approver(APPROVER_ID),
            &record.id,
            "Please shorten to two days",
            Utc::now(),
        )
        .await?;

    assert_eq!(updated.status, LeaveStatus::Pending);
    assert_eq!(updated.change_requests.len(), 1);
    assert_eq!(updated.change_requests[0].comment, "Please shorten to two days");

    let edits = harness.platform.edits();
    assert_eq!(edits.len(), 1);
    assert!(edits[0]
        .1
        .fields
        .iter()
        .any(|f| f.value == "Please shorten to two days"));
    assert!(edits[0].1.decision_id.is_some());

    assert_eq!(harness.platform.direct_messages_to(REQUESTER_ID).len(), 2);

    Ok(())
}

/// Tests an empty comment.
///
/// Expected: Err(Validation) and no change stored
#[tokio::test]
async fn rejects_blank_comment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = factory::create_leave_record(&test).unwrap();
    let harness = Harness::new(&test).await?;

    let result = harness
        .service()
        .request_changes(
            &approver(APPROVER_ID),
            seeded["id"].as_str().unwrap(),
            "  ",
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::LeaveErr(LeaveError::Validation(_)))
    ));
    let raw = test.read_collection(collection::ACTIVE_LEAVES).unwrap();
    assert!(raw[0]["changeRequests"].is_null());

    Ok(())
}

/// Tests a change request from a non-approver.
///
/// Expected: Err(Unauthorized)
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
        .request_changes(
            &staff(OTHER_STAFF_ID),
            seeded["id"].as_str().unwrap(),
            "Shorter please",
            Utc::now(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::LeaveErr(LeaveError::Unauthorized))
    ));

    Ok(())
}
