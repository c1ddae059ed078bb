use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two disjoint account kinds. The lowercase serde names double as the
/// TEXT values stored in kind columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Investor,
    Company,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Investor => "investor",
            AccountKind::Company => "company",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "investor" => Some(AccountKind::Investor),
            "company" => Some(AccountKind::Company),
            _ => None,
        }
    }

    /// The opposite kind: a connection always joins one of each.
    pub fn counterpart(&self) -> Self {
        match self {
            AccountKind::Investor => AccountKind::Company,
            AccountKind::Company => AccountKind::Investor,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection lifecycle: pending until the company side resolves it.
/// Accepted and rejected are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ConnectionStatus::Pending),
            "accepted" => Some(ConnectionStatus::Accepted),
            "rejected" => Some(ConnectionStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The company side's answer to a pending connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionResponse {
    Accept,
    Reject,
}

/// The currently authenticated account, returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub account_id: i64,
    pub kind: AccountKind,
    pub display_name: String,
}

/// A connection joined with the counterpart's identity, ready to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionView {
    pub id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_email: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

/// One line of the dashboard activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: i64,
    pub sender_id: i64,
    pub sender_kind: AccountKind,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub read: bool,
}

/// The most recent message exchanged with a counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastMessage {
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Conversation-list entry: one per counterpart with an accepted connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub counterpart_id: i64,
    pub counterpart_kind: AccountKind,
    pub counterpart_name: String,
    pub last_message: Option<LastMessage>,
}

/// A search hit over the opposite account table, annotated with the current
/// connection status so the caller can render "Connect" vs. the status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub account_id: i64,
    pub kind: AccountKind,
    pub display_name: String,
    pub email: String,
    /// City/state for companies, gender for investors; `None` when the
    /// account never filled those fields in.
    pub detail: Option<String>,
    pub status: Option<ConnectionStatus>,
}

/// An empty query is answered explicitly instead of returning every row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SearchOutcome {
    NoInput,
    Hits(Vec<SearchHit>),
}

/// The dashboard counters shown right after login.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub accepted_connections: i64,
    pub unread_messages: i64,
    pub unread_notifications: i64,
}
