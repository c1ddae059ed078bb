mod common;

use bridge_core::{
    AccountKind, ConnectionResponse, ConnectionStatus, Error, connections, notifications,
};

#[test]
fn request_creates_pending_and_notifies_the_company() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    let company_id = common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    assert_eq!(
        connections::status_between(&db, investor_id, company_id).unwrap(),
        None
    );

    connections::request_connection(&db, investor_id, company_id, AccountKind::Investor).unwrap();

    assert_eq!(
        connections::status_between(&db, investor_id, company_id).unwrap(),
        Some(ConnectionStatus::Pending)
    );
    assert_eq!(
        notifications::unread_count(&db, company_id, AccountKind::Company).unwrap(),
        1
    );
    assert_eq!(
        notifications::unread_count(&db, investor_id, AccountKind::Investor).unwrap(),
        0
    );
}

#[test]
fn company_initiated_request_notifies_the_investor() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    let company_id = common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    connections::request_connection(&db, investor_id, company_id, AccountKind::Company).unwrap();

    assert_eq!(
        notifications::unread_count(&db, investor_id, AccountKind::Investor).unwrap(),
        1
    );
    assert_eq!(
        notifications::unread_count(&db, company_id, AccountKind::Company).unwrap(),
        0
    );
}

#[test]
fn at_most_one_connection_per_pair() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    let company_id = common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    connections::request_connection(&db, investor_id, company_id, AccountKind::Investor).unwrap();
    let err = connections::request_connection(&db, investor_id, company_id, AccountKind::Company)
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists));

    let listed = connections::list_for(&db, company_id, AccountKind::Company).unwrap();
    assert_eq!(listed.len(), 1);

    // The failed request must not leak its notification either.
    assert_eq!(
        notifications::unread_count(&db, investor_id, AccountKind::Investor).unwrap(),
        0
    );
}

#[test]
fn accepting_a_request_resolves_and_notifies_the_investor() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    let company_id = common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    let connection_id =
        connections::request_connection(&db, investor_id, company_id, AccountKind::Investor)
            .unwrap();
    connections::respond(&db, connection_id, ConnectionResponse::Accept).unwrap();

    assert_eq!(
        connections::status_between(&db, investor_id, company_id).unwrap(),
        Some(ConnectionStatus::Accepted)
    );

    let listed = connections::list_for(&db, company_id, AccountKind::Company).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].counterpart_name, "Alice Moura");
    assert_eq!(listed[0].counterpart_email, "a@x.com");
    assert_eq!(listed[0].status, ConnectionStatus::Accepted);

    assert_eq!(
        notifications::unread_count(&db, investor_id, AccountKind::Investor).unwrap(),
        1
    );
}

#[test]
fn resolved_connections_are_terminal() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    let company_id = common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    let connection_id =
        connections::request_connection(&db, investor_id, company_id, AccountKind::Investor)
            .unwrap();
    connections::respond(&db, connection_id, ConnectionResponse::Reject).unwrap();

    let err = connections::respond(&db, connection_id, ConnectionResponse::Accept).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition(ConnectionStatus::Rejected)
    ));
    assert_eq!(
        connections::status_between(&db, investor_id, company_id).unwrap(),
        Some(ConnectionStatus::Rejected)
    );
}

#[test]
fn accepted_connections_cannot_be_re_resolved() {
    let (_dir, db) = common::open_store();
    let (_investor_id, _company_id, connection_id) = common::connected_pair(&db);

    let err = connections::respond(&db, connection_id, ConnectionResponse::Reject).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition(ConnectionStatus::Accepted)
    ));
}

#[test]
fn responding_to_a_missing_connection_fails() {
    let (_dir, db) = common::open_store();
    let err = connections::respond(&db, 42, ConnectionResponse::Accept).unwrap_err();
    assert!(matches!(err, Error::NotFound));
}

#[test]
fn requesting_with_an_unknown_account_fails() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");

    let err = connections::request_connection(&db, investor_id, 999, AccountKind::Investor)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));
}

#[test]
fn listing_is_newest_first() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    for (i, name) in ["First Corp", "Second Corp", "Third Corp"].iter().enumerate() {
        let company_id = common::company(
            &db,
            name,
            &format!("00.000.00{i}/0001-0{i}"),
            &format!("c{i}@y.com"),
            "pw",
        );
        connections::request_connection(&db, investor_id, company_id, AccountKind::Investor)
            .unwrap();
    }

    let listed = connections::list_for(&db, investor_id, AccountKind::Investor).unwrap();
    let names: Vec<_> = listed.iter().map(|c| c.counterpart_name.as_str()).collect();
    assert_eq!(names, ["Third Corp", "Second Corp", "First Corp"]);
}

#[test]
fn recent_activity_caps_at_five() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    for i in 0..6 {
        let company_id = common::company(
            &db,
            &format!("Company {i}"),
            &format!("00.000.00{i}/0001-0{i}"),
            &format!("c{i}@y.com"),
            "pw",
        );
        connections::request_connection(&db, investor_id, company_id, AccountKind::Investor)
            .unwrap();
    }

    let feed = connections::recent_activity(&db, investor_id, AccountKind::Investor).unwrap();
    assert_eq!(feed.len(), 5);
    assert_eq!(feed[0].description, "New connection with Company 5");
}
