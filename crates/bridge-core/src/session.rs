//! Explicit session lifecycle. One account is authenticated at a time; a
//! second login replaces the first.

use tracing::info;

use bridge_db::{Database, Error};
use bridge_types::Session;

use crate::accounts;

#[derive(Default)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, db: &Database, email: &str, password: &str) -> Result<&Session, Error> {
        let session = accounts::authenticate(db, email, password)?;
        info!(
            "Logged in as {} {} ({})",
            session.kind, session.account_id, session.display_name
        );
        Ok(self.current.insert(session))
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!("Logged out {} {}", session.kind, session.account_id);
        }
    }
}
