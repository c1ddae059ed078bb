//! Notification outbox: append-only system events tied to connection-state
//! changes, plus the read flag.

use bridge_db::{Database, Error};
use bridge_types::{AccountKind, NotificationView};

use crate::time::parse_timestamp;

pub fn notify(
    db: &Database,
    recipient_id: i64,
    recipient_kind: AccountKind,
    title: &str,
    body: &str,
) -> Result<i64, Error> {
    db.insert_notification(recipient_id, recipient_kind, title, body)
}

pub fn unread_count(db: &Database, recipient_id: i64, kind: AccountKind) -> Result<i64, Error> {
    db.unread_notification_count(recipient_id, kind)
}

pub fn mark_read(db: &Database, notification_id: i64) -> Result<(), Error> {
    db.mark_notification_read(notification_id)
}

/// Newest first.
pub fn list_for(
    db: &Database,
    recipient_id: i64,
    kind: AccountKind,
) -> Result<Vec<NotificationView>, Error> {
    let views = db
        .notifications_for(recipient_id, kind)?
        .into_iter()
        .map(|row| NotificationView {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: parse_timestamp(&row.created_at),
            read: row.read,
        })
        .collect();
    Ok(views)
}
