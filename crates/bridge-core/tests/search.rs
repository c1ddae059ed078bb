mod common;

use bridge_core::{AccountKind, ConnectionStatus, SearchOutcome, connections, search};

#[test]
fn empty_query_is_answered_explicitly() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    for query in ["", "   "] {
        let outcome = search::search(&db, investor_id, AccountKind::Investor, query).unwrap();
        assert!(matches!(outcome, SearchOutcome::NoInput));
    }
}

#[test]
fn investor_finds_company_by_trade_name_substring() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    let company_id = common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    let SearchOutcome::Hits(hits) =
        search::search(&db, investor_id, AccountKind::Investor, "cme").unwrap()
    else {
        panic!("expected hits");
    };
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].account_id, company_id);
    assert_eq!(hits[0].display_name, "Acme Capital");
    assert_eq!(hits[0].detail.as_deref(), Some("Springfield, IL"));
    assert_eq!(hits[0].status, None);

    // The annotation follows the ledger: pending right after a request.
    connections::request_connection(&db, investor_id, company_id, AccountKind::Investor).unwrap();
    let SearchOutcome::Hits(hits) =
        search::search(&db, investor_id, AccountKind::Investor, "cme").unwrap()
    else {
        panic!("expected hits");
    };
    assert_eq!(hits[0].status, Some(ConnectionStatus::Pending));
}

#[test]
fn matching_is_case_insensitive() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    let SearchOutcome::Hits(hits) =
        search::search(&db, investor_id, AccountKind::Investor, "ACME").unwrap()
    else {
        panic!("expected hits");
    };
    assert_eq!(hits.len(), 1);
}

#[test]
fn legal_name_and_email_also_match() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    // common::company derives the legal name as "<trade name> Ltd."
    let SearchOutcome::Hits(by_legal) =
        search::search(&db, investor_id, AccountKind::Investor, "Ltd").unwrap()
    else {
        panic!("expected hits");
    };
    assert_eq!(by_legal.len(), 1);

    let SearchOutcome::Hits(by_email) =
        search::search(&db, investor_id, AccountKind::Investor, "b@y").unwrap()
    else {
        panic!("expected hits");
    };
    assert_eq!(by_email.len(), 1);
}

#[test]
fn company_finds_investors_by_name_or_email() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    let company_id = common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");
    common::investor(&db, "Bruno Lima", "bruno@x.com", "pw3");

    let SearchOutcome::Hits(hits) =
        search::search(&db, company_id, AccountKind::Company, "moura").unwrap()
    else {
        panic!("expected hits");
    };
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].account_id, investor_id);
    assert_eq!(hits[0].kind, AccountKind::Investor);
    assert_eq!(hits[0].detail.as_deref(), Some("other"));
}

#[test]
fn no_match_yields_empty_hits() {
    let (_dir, db) = common::open_store();
    let investor_id = common::investor(&db, "Alice Moura", "a@x.com", "pw1");
    common::company(&db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");

    let SearchOutcome::Hits(hits) =
        search::search(&db, investor_id, AccountKind::Investor, "zzz").unwrap()
    else {
        panic!("expected hits");
    };
    assert!(hits.is_empty());
}
