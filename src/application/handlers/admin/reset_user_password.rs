//! ResetUserPasswordHandler - Operator command to replace a user's password.
//!
//! The user must change the password on next login, and every open
//! session for the account is revoked.

use std::sync::Arc;

use crate::application::views::UserView;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::Password;
use crate::ports::{Clock, SessionStore, UserRepository};

#[derive(Debug, Clone)]
pub struct ResetUserPasswordCommand {
    pub user_id: UserId,
    pub new_password: String,
}

pub struct ResetUserPasswordHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl ResetUserPasswordHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            sessions,
            clock,
        }
    }

    pub async fn handle(&self, cmd: ResetUserPasswordCommand) -> Result<UserView, DomainError> {
        let mut user = self.users.find_by_id(cmd.user_id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::UserNotFound, "User")
        })?;
        let password = Password::new(cmd.new_password)?;

        user.reset_password(&password, self.clock.now());
        self.users.update(&user).await?;
        let revoked = self.sessions.remove_for_user(cmd.user_id).await?;

        tracing::warn!(
            user_id = %cmd.user_id,
            revoked_sessions = revoked,
            "password reset by operator"
        );
        Ok(UserView::from(&user))
    }
}
