mod common;

use bridge_core::{AccountKind, Error, dashboard, messages, notifications};

#[test]
fn counters_track_connections_messages_and_notifications() {
    let (_dir, db) = common::open_store();
    let (investor_id, company_id, _) = common::connected_pair(&db);
    messages::send(
        &db,
        company_id,
        AccountKind::Company,
        investor_id,
        AccountKind::Investor,
        "thanks for connecting",
    )
    .unwrap();

    // The investor holds one accepted connection, one unread message, and
    // the unread acceptance notification.
    let summary = dashboard::summary(&db, investor_id, AccountKind::Investor).unwrap();
    assert_eq!(summary.accepted_connections, 1);
    assert_eq!(summary.unread_messages, 1);
    assert_eq!(summary.unread_notifications, 1);

    // The company's request notification is still unread on its side.
    let summary = dashboard::summary(&db, company_id, AccountKind::Company).unwrap();
    assert_eq!(summary.accepted_connections, 1);
    assert_eq!(summary.unread_messages, 0);
    assert_eq!(summary.unread_notifications, 1);
}

#[test]
fn marking_a_notification_read_drops_the_unread_count() {
    let (_dir, db) = common::open_store();
    let (investor_id, _, _) = common::connected_pair(&db);

    let listed = notifications::list_for(&db, investor_id, AccountKind::Investor).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].read);
    assert_eq!(listed[0].title, "Connection request answered");
    assert_eq!(listed[0].body, "Your connection request was accepted");

    notifications::mark_read(&db, listed[0].id).unwrap();
    assert_eq!(
        notifications::unread_count(&db, investor_id, AccountKind::Investor).unwrap(),
        0
    );
}

#[test]
fn marking_a_missing_notification_fails() {
    let (_dir, db) = common::open_store();
    let err = notifications::mark_read(&db, 99).unwrap_err();
    assert!(matches!(err, Error::NotFound));
}

#[test]
fn direct_notifications_append_unread() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");

    notifications::notify(
        &db,
        investor_id,
        AccountKind::Investor,
        "Welcome",
        "Your account is ready",
    )
    .unwrap();

    assert_eq!(
        notifications::unread_count(&db, investor_id, AccountKind::Investor).unwrap(),
        1
    );
}
