//! Connection ledger: the pending → accepted/rejected state machine between
//! one investor and one company, with its notification side effects.

use tracing::{info, warn};

use bridge_db::{Database, Error};
use bridge_types::{AccountKind, ActivityEntry, ConnectionResponse, ConnectionStatus, ConnectionView};

use crate::time::parse_timestamp;

/// The dashboard activity feed shows at most this many entries.
const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Creates a pending request between the pair and notifies the counterpart
/// of whoever initiated it. At most one connection can ever exist per pair.
pub fn request_connection(
    db: &Database,
    investor_id: i64,
    company_id: i64,
    initiated_by: AccountKind,
) -> Result<i64, Error> {
    let (recipient_id, recipient_kind, body) = match initiated_by {
        AccountKind::Investor => (
            company_id,
            AccountKind::Company,
            "An investor wants to connect with your company",
        ),
        AccountKind::Company => (
            investor_id,
            AccountKind::Investor,
            "A company wants to connect with you",
        ),
    };

    let id = db.insert_connection(
        investor_id,
        company_id,
        recipient_id,
        recipient_kind,
        "New connection request",
        body,
    )?;
    info!(
        "Connection {} requested between investor {} and company {}",
        id, investor_id, company_id
    );
    Ok(id)
}

/// Resolves a pending request. Accepted and rejected are terminal: a second
/// call fails with `InvalidTransition` and changes nothing.
pub fn respond(
    db: &Database,
    connection_id: i64,
    response: ConnectionResponse,
) -> Result<(), Error> {
    let status = match response {
        ConnectionResponse::Accept => ConnectionStatus::Accepted,
        ConnectionResponse::Reject => ConnectionStatus::Rejected,
    };
    let body = format!("Your connection request was {status}");
    db.resolve_connection(connection_id, status, "Connection request answered", &body)?;
    info!("Connection {} {}", connection_id, status);
    Ok(())
}

/// All connections involving the account, newest first, joined with the
/// counterpart's name and email.
pub fn list_for(
    db: &Database,
    account_id: i64,
    kind: AccountKind,
) -> Result<Vec<ConnectionView>, Error> {
    let rows = db.connections_for(account_id, kind)?;
    let views = rows
        .into_iter()
        .map(|row| ConnectionView {
            id: row.id,
            counterpart_id: row.counterpart_id,
            counterpart_name: row.counterpart_name,
            counterpart_email: row.counterpart_email,
            status: parse_status(&row.status),
            created_at: parse_timestamp(&row.created_at),
        })
        .collect();
    Ok(views)
}

/// The dashboard feed: the newest connections rendered as activity lines.
pub fn recent_activity(
    db: &Database,
    account_id: i64,
    kind: AccountKind,
) -> Result<Vec<ActivityEntry>, Error> {
    let entries = db
        .connections_for(account_id, kind)?
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|row| ActivityEntry {
            description: format!("New connection with {}", row.counterpart_name),
            occurred_at: parse_timestamp(&row.created_at),
        })
        .collect();
    Ok(entries)
}

/// `None` means no request was ever made between the pair.
pub fn status_between(
    db: &Database,
    investor_id: i64,
    company_id: i64,
) -> Result<Option<ConnectionStatus>, Error> {
    let status = db.connection_status(investor_id, company_id)?;
    Ok(status.as_deref().map(parse_status))
}

pub(crate) fn parse_status(raw: &str) -> ConnectionStatus {
    ConnectionStatus::parse(raw).unwrap_or_else(|| {
        warn!("Corrupt connection status '{}'", raw);
        ConnectionStatus::Pending
    })
}
