//! CreateSessionHandler - Command handler for issuing bearer sessions.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SessionToken, UserId};
use crate::domain::session::{Session, SessionInfo};
use crate::ports::{Clock, SessionStore, UserRepository};

/// Command to open a session for a user.
#[derive(Debug, Clone, Copy)]
pub struct CreateSessionCommand {
    pub user_id: UserId,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    ttl_ms: u64,
}

impl CreateSessionHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        ttl_ms: u64,
    ) -> Self {
        Self {
            users,
            sessions,
            clock,
            ttl_ms,
        }
    }

    /// Issues a fresh token. The token is only ever returned here.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    /// - `Forbidden` if the account is inactive
    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<SessionInfo, DomainError> {
        let user = self.users.find_by_id(cmd.user_id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::UserNotFound, format!("User {}", cmd.user_id))
        })?;
        if !user.is_active() {
            return Err(DomainError::new(ErrorCode::Forbidden, "Account is inactive")
                .with_detail("user_id", cmd.user_id.to_string()));
        }

        let token = SessionToken::generate();
        let session = Session::open(cmd.user_id, self.clock.now(), self.ttl_ms);
        let info = session.info(&token);
        self.sessions.insert(&token, session).await?;

        tracing::info!(user_id = %cmd.user_id, token = %token.redacted(), "session created");
        Ok(info)
    }
}
