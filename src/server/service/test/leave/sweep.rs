use super::*;

/// Tests expiry of an approved leave whose end date has passed.
///
/// Expected: the record moves to history as expired, its role is revoked and the
/// requester notified
#[tokio::test]
async fn expires_finished_leave() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let seeded = LeaveRecordFactory::new(&test)
        .requester(REQUESTER_ID, "Requester")
        .dates(days_from_today(-5), days_from_today(-1))
        .approved_by(APPROVER_ID)
        .granted_role(LEAVE_ROLE_ID)
        .build()
        .unwrap();
    let harness = Harness::new(&test).await?;

    let summary = harness.service().sweep(Utc::now()).await?;

    assert_eq!(summary.expired, 1);
    assert_eq!(summary.notified, 1);
    assert_eq!(active_count(&test), 0);

    let history = test.read_collection(collection::LEAVE_HISTORY).unwrap();
    assert_eq!(history[0]["id"], seeded["id"]);
    assert_eq!(history[0]["status"]["reason"], "expired");

    assert_eq!(harness.platform.revokes(), vec![(REQUESTER_ID, LEAVE_ROLE_ID)]);
    assert_eq!(harness.platform.direct_messages_to(REQUESTER_ID).len(), 1);

    Ok(())
}

/// Tests a leave ending today.
///
/// Expected: kept, since the end date is inclusive
#[tokio::test]
async fn keeps_leave_ending_today() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    factory::create_approved_leave(
        &test,
        REQUESTER_ID,
        days_from_today(-3),
        days_from_today(0),
        APPROVER_ID,
    )
    .unwrap();
    let harness = Harness::new(&test).await?;

    let summary = harness.service().sweep(Utc::now()).await?;

    assert_eq!(summary.expired, 0);
    assert_eq!(active_count(&test), 1);
    assert!(harness.platform.calls().is_empty());

    Ok(())
}

/// Tests a stale copy of an already swept record reappearing.
///
/// Simulates a second process writing back a record the first one already expired.
///
/// Expected: removed again, but the requester is notified only once
#[tokio::test]
async fn notifies_each_expiry_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let stale_record = LeaveRecordFactory::new(&test)
        .id("LOA-STALE")
        .requester(REQUESTER_ID, "Requester")
        .dates(days_from_today(-4), days_from_today(-2))
        .approved_by(APPROVER_ID)
        .granted_role(LEAVE_ROLE_ID);
    let stale = stale_record.value();
    stale_record.build().unwrap();
    let harness = Harness::new(&test).await?;
    let service = harness.service();

    let first = service.sweep(Utc::now()).await?;
    test.append_to_collection(collection::ACTIVE_LEAVES, stale)
        .unwrap();
    let second = service.sweep(Utc::now()).await?;

    assert_eq!(first.notified, 1);
    assert_eq!(second.expired, 1);
    assert_eq!(second.notified, 0);
    assert_eq!(active_count(&test), 0);
    assert_eq!(harness.platform.revokes().len(), 1);
    assert_eq!(harness.platform.direct_messages_to(REQUESTER_ID).len(), 1);

    Ok(())
}

/// Tests expiry of records that were never approved.
///
/// Expected: pending and denied records are removed and their requesters notified, but no
/// role is revoked
#[tokio::test]
async fn expires_undecided_records_without_revoking() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    LeaveRecordFactory::new(&test)
        .requester(REQUESTER_ID, "Requester")
        .dates(days_from_today(-3), days_from_today(-1))
        .build()
        .unwrap();
    LeaveRecordFactory::new(&test)
        .requester(OTHER_STAFF_ID, "Other")
        .dates(days_from_today(-3), days_from_today(-1))
        .denied_by(APPROVER_ID)
        .build()
        .unwrap();
    let harness = Harness::new(&test).await?;

    let summary = harness.service().sweep(Utc::now()).await?;

    assert_eq!(summary.expired, 2);
    assert!(harness.platform.revokes().is_empty());
    assert_eq!(harness.platform.direct_messages_to(REQUESTER_ID).len(), 1);
    assert_eq!(harness.platform.direct_messages_to(OTHER_STAFF_ID).len(), 1);

    Ok(())
}

/// Tests expiry while the platform is unreachable.
///
/// Expected: the record is still removed and archived
#[tokio::test]
async fn commits_despite_failed_revoke() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    LeaveRecordFactory::new(&test)
        .dates(days_from_today(-3), days_from_today(-1))
        .approved_by(APPROVER_ID)
        .granted_role(LEAVE_ROLE_ID)
        .build()
        .unwrap();
    let harness = Harness::with_platform(&test, RecordingPlatform::failing()).await?;

    harness.service().sweep(Utc::now()).await?;

    assert_eq!(active_count(&test), 0);
    assert_eq!(harness.platform.revokes().len(), 1);
    let history = test.read_collection(collection::LEAVE_HISTORY).unwrap();
    assert_eq!(history.as_array().map(|h| h.len()), Some(1));

    Ok(())
}

/// Tests pruning of the bounded collections.
///
/// Expected: old ledger entries, history entries and links of finished records are
/// dropped; recent entries and links of active records are kept
#[tokio::test]
async fn prunes_old_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    let now = Utc::now();
    factory::create_ledger_entry(&test, REQUESTER_ID, "LOA-OLD", now - Duration::days(31))
        .unwrap();
    factory::create_ledger_entry(&test, REQUESTER_ID, "LOA-RECENT", now - Duration::days(2))
        .unwrap();
    LeaveRecordFactory::new(&test)
        .dates(ymd(2024, 1, 1), ymd(2024, 1, 3))
        .removed("expired", now - Duration::days(91))
        .build()
        .unwrap();
    LeaveRecordFactory::new(&test)
        .dates(days_from_today(-10), days_from_today(-8))
        .removed("expired", now - Duration::days(5))
        .build()
        .unwrap();
    let active = LeaveRecordFactory::new(&test)
        .requester(OTHER_STAFF_ID, "Other")
        .dates(days_from_today(-100), days_from_today(30))
        .approved_by(APPROVER_ID)
        .build()
        .unwrap();
    let active_id = active["id"].as_str().unwrap();
    factory::create_message_link(&test, active_id, LEAVE_CHANNEL_ID, 1, now - Duration::days(95))
        .unwrap();
    factory::create_message_link(&test, "LOA-FINISHED", LEAVE_CHANNEL_ID, 2, now - Duration::days(95))
        .unwrap();
    let harness = Harness::new(&test).await?;

    let summary = harness.service().sweep(now).await?;

    assert_eq!(summary.expired, 0);
    assert_eq!(summary.ledger_pruned, 1);
    assert_eq!(summary.history_pruned, 1);
    assert_eq!(summary.links_pruned, 1);

    let links = MessageLinkRepository::new(&harness.store);
    assert!(links.find(active_id).await?.is_some());
    assert!(links.find("LOA-FINISHED").await?.is_none());

    Ok(())
}

/// Tests sweeping in a process without a chat platform.
///
/// Expected: the expiry is queued as a `loa_effect` envelope
#[tokio::test]
async fn defers_expiry_effects_without_platform() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_default_role_config()
        .build()
        .await
        .unwrap();
    LeaveRecordFactory::new(&test)
        .dates(days_from_today(-3), days_from_today(-1))
        .approved_by(APPROVER_ID)
        .build()
        .unwrap();
    let harness = Harness::new(&test).await?;

    harness.offline().sweep(Utc::now()).await?;

    assert_eq!(
        queued_kinds(&test),
        vec![kind::LEAVE_STATUS_UPDATE, kind::LEAVE_EFFECT]
    );
    let log = test.read_collection(collection::NOTIFICATIONS).unwrap();
    assert_eq!(log[1]["payload"]["kind"], "expired");

    Ok(())
}

/// Tests expiry of an old leave after its requester was approved for a new one.
///
/// The old record no longer blocks requests once its end date has passed, so a new leave
/// can be approved before the next sweep runs.
///
/// Expected: the old record is removed, but the role held by the new leave stays and no
/// welcome-back message is sent
#[tokio::test]
async fn keeps_role_held_by_newer_leave() -> Result<(), AppError> {
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
    let harness = Harness::new(&test).await?;
    let service = harness.service();

    let current = service
        .submit(
            &staff(REQUESTER_ID),
            request(days_from_today(0), days_from_today(3)),
            Utc::now(),
        )
        .await?;
    service
        .decide(
            &approver(APPROVER_ID),
            &current.id,
            DecisionOutcome::Approve,
            Utc::now(),
        )
        .await?;
    let dms_before = harness.platform.direct_messages_to(REQUESTER_ID).len();

    let summary = service.sweep(Utc::now()).await?;

    assert_eq!(summary.expired, 1);
    assert!(harness.platform.revokes().is_empty());
    assert_eq!(
        harness.platform.direct_messages_to(REQUESTER_ID).len(),
        dms_before
    );

    let remaining = LeaveRecordRepository::new(&harness.store).all().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, current.id);
    assert_eq!(remaining[0].granted_role_id, Some(LEAVE_ROLE_ID));

    Ok(())
}
