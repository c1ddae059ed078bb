pub mod models;

// Re-export key types for convenience.
pub use models::{
    AccountKind, ActivityEntry, ConnectionResponse, ConnectionStatus, ConnectionView,
    ConversationSummary, DashboardSummary, LastMessage, MessageView, NotificationView,
    SearchHit, SearchOutcome, Session,
};
