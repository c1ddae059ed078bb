#![allow(dead_code)]

use bridge_core::accounts::{self, NewCompany, NewInvestor};
use bridge_core::connections;
use bridge_core::{AccountKind, ConnectionResponse, Database};
use tempfile::TempDir;

/// Fresh on-disk store per test. The TempDir must stay alive for the
/// duration of the test.
pub fn open_store() -> (TempDir, Database) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bridge_core=debug,bridge_db=debug")
        .try_init();

    let dir = TempDir::new().expect("temp dir");
    let db = Database::open(&dir.path().join("bridge.db")).expect("open store");
    (dir, db)
}

pub fn investor(db: &Database, name: &str, email: &str, password: &str) -> i64 {
    accounts::register_investor(
        db,
        &NewInvestor {
            full_name: name.to_string(),
            email: email.to_string(),
            gender: Some("other".to_string()),
            phone: None,
            password: password.to_string(),
            confirm_password: password.to_string(),
        },
    )
    .expect("register investor")
}

pub fn company(db: &Database, trade_name: &str, tax_id: &str, email: &str, password: &str) -> i64 {
    accounts::register_company(
        db,
        &NewCompany {
            tax_id: tax_id.to_string(),
            trade_name: trade_name.to_string(),
            legal_name: format!("{trade_name} Ltd."),
            street: None,
            street_number: None,
            unit: None,
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
            postal_code: None,
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        },
    )
    .expect("register company")
}

/// A ready-to-message pair: both accounts registered, connection requested
/// by the investor and accepted by the company.
pub fn connected_pair(db: &Database) -> (i64, i64, i64) {
    let investor_id = investor(db, "Alice Moura", "a@x.com", "pw1");
    let company_id = company(db, "Acme Capital", "11.222.333/0001-44", "b@y.com", "pw2");
    let connection_id =
        connections::request_connection(db, investor_id, company_id, AccountKind::Investor)
            .expect("request connection");
    connections::respond(db, connection_id, ConnectionResponse::Accept).expect("accept");
    (investor_id, company_id, connection_id)
}
