//! LogoutHandler - Command handler for ending a session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, SessionToken};
use crate::ports::SessionStore;

/// Command to invalidate a token.
#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub token: SessionToken,
}

/// Handler for logging out.
pub struct LogoutHandler {
    sessions: Arc<dyn SessionStore>,
}

impl LogoutHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Returns whether a session was removed.
    pub async fn handle(&self, cmd: LogoutCommand) -> Result<bool, DomainError> {
        let removed = self.sessions.remove(&cmd.token).await?;
        if removed {
            tracing::info!(token = %cmd.token.redacted(), "session ended");
        }
        Ok(removed)
    }
}
