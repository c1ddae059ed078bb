//! Message log: plain-text messages between connected pairs. Sending and
//! reading both require the pair's connection to be accepted.

use tracing::{debug, warn};

use bridge_db::{Database, Error};
use bridge_types::{AccountKind, ConversationSummary, LastMessage, MessageView};

use crate::time::parse_timestamp;

pub fn send(
    db: &Database,
    sender_id: i64,
    sender_kind: AccountKind,
    recipient_id: i64,
    recipient_kind: AccountKind,
    body: &str,
) -> Result<i64, Error> {
    if sender_kind == recipient_kind {
        return Err(Error::Validation(
            "messages can only be exchanged between an investor and a company".into(),
        ));
    }
    let body = body.trim();
    if body.is_empty() {
        return Err(Error::Validation("message body is empty".into()));
    }

    let id = db.insert_message(sender_id, sender_kind, recipient_id, recipient_kind, body)?;
    debug!(
        "Message {} sent from {} {} to {} {}",
        id, sender_kind, sender_id, recipient_kind, recipient_id
    );
    Ok(id)
}

/// One entry per counterpart with an accepted connection, carrying the most
/// recent message between the pair, if any.
pub fn conversation_summaries(
    db: &Database,
    account_id: i64,
    kind: AccountKind,
) -> Result<Vec<ConversationSummary>, Error> {
    let summaries = db
        .conversation_summaries(account_id, kind)?
        .into_iter()
        .map(|row| {
            let last_message = match (row.last_body, row.last_sent_at) {
                (Some(body), Some(sent_at)) => Some(LastMessage {
                    body,
                    sent_at: parse_timestamp(&sent_at),
                }),
                _ => None,
            };
            ConversationSummary {
                counterpart_id: row.counterpart_id,
                counterpart_kind: kind.counterpart(),
                counterpart_name: row.counterpart_name,
                last_message,
            }
        })
        .collect();
    Ok(summaries)
}

/// Returns the pair's history oldest first and marks the viewer's incoming
/// messages read. Requires an accepted connection.
pub fn open_conversation(
    db: &Database,
    viewer_id: i64,
    viewer_kind: AccountKind,
    counterpart_id: i64,
) -> Result<Vec<MessageView>, Error> {
    let views = db
        .open_conversation(viewer_id, viewer_kind, counterpart_id)?
        .into_iter()
        .map(|row| MessageView {
            id: row.id,
            sender_id: row.sender_id,
            sender_kind: AccountKind::parse(&row.sender_kind).unwrap_or_else(|| {
                warn!("Corrupt sender kind '{}' on message {}", row.sender_kind, row.id);
                viewer_kind
            }),
            body: row.body,
            sent_at: parse_timestamp(&row.sent_at),
            read: row.read,
        })
        .collect();
    Ok(views)
}

pub fn unread_count(db: &Database, recipient_id: i64, kind: AccountKind) -> Result<i64, Error> {
    db.unread_message_count(recipient_id, kind)
}
