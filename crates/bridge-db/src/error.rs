use bridge_types::ConnectionStatus;
use thiserror::Error;

/// Domain error taxonomy. Every variant is recoverable: callers display the
/// message and carry on. Only store startup ([`crate::Database::open`]) may
/// abort the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("this {0} is already registered")]
    DuplicateIdentity(&'static str),

    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("a connection between these accounts already exists")]
    AlreadyExists,

    #[error("connection was already {0}")]
    InvalidTransition(ConnectionStatus),

    #[error("these accounts do not have an accepted connection")]
    NotConnected,

    #[error("record not found")]
    NotFound,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("database lock poisoned")]
    Poisoned,
}

pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
