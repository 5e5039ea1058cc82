//! UpdateUserHandler - Command handler for partial user updates.

use std::sync::Arc;

use crate::application::views::UserView;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::UserPatch;
use crate::ports::{Clock, UserRepository};

/// Command to update a user's profile fields.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub patch: UserPatch,
}

/// Handler for updating users.
pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<UserView, DomainError> {
        let mut user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::UserNotFound, format!("User {}", cmd.user_id))
            })?;

        user.apply(cmd.patch, self.clock.now())?;
        self.users.update(&user).await?;

        tracing::debug!(user_id = %cmd.user_id, "user updated");
        Ok(UserView::from(&user))
    }
}
