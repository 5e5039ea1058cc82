//! DeleteUserHandler - Command handler for removing user accounts.
//!
//! Deleting a user also drops their sessions and stored preferences.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{PreferencesRepository, SessionStore, UserRepository};

/// Command to delete a user.
#[derive(Debug, Clone, Copy)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

/// Handler for deleting users.
pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    preferences: Arc<dyn PreferencesRepository>,
}

impl DeleteUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        preferences: Arc<dyn PreferencesRepository>,
    ) -> Self {
        Self {
            users,
            sessions,
            preferences,
        }
    }

    /// Returns whether a user was removed.
    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<bool, DomainError> {
        if !self.users.delete(cmd.user_id).await? {
            return Ok(false);
        }

        let revoked = self.sessions.remove_for_user(cmd.user_id).await?;
        self.preferences.remove(cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, revoked_sessions = revoked, "user deleted");
        Ok(true)
    }
}
