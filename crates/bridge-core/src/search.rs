//! Substring search across the opposite account table, annotated with the
//! current connection status per hit.

use bridge_db::{Database, Error};
use bridge_types::{AccountKind, SearchHit, SearchOutcome};

use crate::connections::parse_status;

/// Case-insensitive substring match. Investors search companies by trade
/// name, legal name, or email; companies search investors by full name or
/// email. An empty query is answered with `NoInput`, never with all rows.
pub fn search(
    db: &Database,
    searcher_id: i64,
    searcher_kind: AccountKind,
    query: &str,
) -> Result<SearchOutcome, Error> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchOutcome::NoInput);
    }

    let hits = match searcher_kind {
        AccountKind::Investor => db
            .search_companies(searcher_id, query)?
            .into_iter()
            .map(|row| SearchHit {
                account_id: row.id,
                kind: AccountKind::Company,
                display_name: row.trade_name,
                email: row.email,
                detail: match (row.city, row.state) {
                    (Some(city), Some(state)) => Some(format!("{city}, {state}")),
                    _ => None,
                },
                status: row.status.as_deref().map(parse_status),
            })
            .collect(),
        AccountKind::Company => db
            .search_investors(searcher_id, query)?
            .into_iter()
            .map(|row| SearchHit {
                account_id: row.id,
                kind: AccountKind::Investor,
                display_name: row.full_name,
                email: row.email,
                detail: row.gender,
                status: row.status.as_deref().map(parse_status),
            })
            .collect(),
    };

    Ok(SearchOutcome::Hits(hits))
}
