//! ValidateSessionHandler - Query handler that resolves a bearer token.
//!
//! Expired sessions are removed the first time they are presented.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SessionToken};
use crate::domain::session::SessionInfo;
use crate::ports::{Clock, SessionStore};

/// Query to validate a token.
#[derive(Debug, Clone)]
pub struct ValidateSessionQuery {
    pub token: SessionToken,
}

/// Handler for validating sessions.
pub struct ValidateSessionHandler {
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl ValidateSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { sessions, clock }
    }

    /// # Errors
    ///
    /// - `Unauthorized` if the token is unknown or the session has expired
    pub async fn handle(&self, query: ValidateSessionQuery) -> Result<SessionInfo, DomainError> {
        let session = self
            .sessions
            .get(&query.token)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::Unauthorized, "Invalid session"))?;

        if session.is_expired(self.clock.now()) {
            self.sessions.remove(&query.token).await?;
            tracing::debug!(token = %query.token.redacted(), "expired session removed");
            return Err(DomainError::new(ErrorCode::Unauthorized, "Session expired"));
        }

        Ok(session.info(&query.token))
    }
}
