//! Domain core for the investor/company connection system.
//!
//! The presentation layer (forms, dialogs, rendering) is an external
//! collaborator: it collects input, calls these services, and renders the
//! returned views. Every service is a synchronous call against the shared
//! [`Database`]; all failures after startup are recoverable [`Error`] values
//! meant to be shown to the user.

pub mod accounts;
pub mod connections;
pub mod dashboard;
pub mod messages;
pub mod notifications;
pub mod search;
pub mod session;

mod time;

pub use bridge_db::{Database, Error};
pub use bridge_types::{
    AccountKind, ConnectionResponse, ConnectionStatus, SearchOutcome, Session,
};
pub use session::SessionContext;
