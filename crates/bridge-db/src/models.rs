//! Database row types — these map directly to SQLite rows.
//! Kind, status, and timestamp columns stay raw strings here; the core
//! crate converts them at the view boundary.

pub struct InvestorRow {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub password_hash: String,
    pub created_at: String,
}

pub struct CompanyRow {
    pub id: i64,
    pub tax_id: String,
    pub trade_name: String,
    pub legal_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

/// A connection joined with the counterpart's display name and email.
pub struct ConnectionRow {
    pub id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_email: String,
    pub status: String,
    pub created_at: String,
}

pub struct NotificationRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub read: bool,
}

pub struct MessageRow {
    pub id: i64,
    pub sender_id: i64,
    pub sender_kind: String,
    pub body: String,
    pub sent_at: String,
    pub read: bool,
}

/// Conversation-list row: counterpart plus the newest message, if any.
pub struct ConversationRow {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub last_body: Option<String>,
    pub last_sent_at: Option<String>,
}

pub struct CompanyHitRow {
    pub id: i64,
    pub trade_name: String,
    pub email: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
}

pub struct InvestorHitRow {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub status: Option<String>,
}
