//! The counters shown right after login.

use bridge_db::{Database, Error};
use bridge_types::{AccountKind, DashboardSummary};

pub fn summary(db: &Database, account_id: i64, kind: AccountKind) -> Result<DashboardSummary, Error> {
    Ok(DashboardSummary {
        accepted_connections: db.accepted_connection_count(account_id, kind)?,
        unread_messages: db.unread_message_count(account_id, kind)?,
        unread_notifications: db.unread_notification_count(account_id, kind)?,
    })
}
