//! BulkUpdateRolesHandler - Operator command assigning one role to many users.

use std::sync::Arc;

use crate::application::views::UserView;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Role;
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct BulkUpdateRolesCommand {
    pub user_ids: Vec<UserId>,
    /// One of `user`, `moderator`, `admin`.
    pub role: String,
}

pub struct BulkUpdateRolesHandler {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl BulkUpdateRolesHandler {
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    /// Returns the updated users; ids with no user are skipped.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` for an unknown role, before any user is touched
    pub async fn handle(&self, cmd: BulkUpdateRolesCommand) -> Result<Vec<UserView>, DomainError> {
        let role: Role = cmd.role.parse()?;
        let now = self.clock.now();

        let mut updated = Vec::with_capacity(cmd.user_ids.len());
        for user_id in cmd.user_ids {
            let Some(mut user) = self.users.find_by_id(user_id).await? else {
                tracing::debug!(user_id = %user_id, "skipping unknown user in role update");
                continue;
            };
            user.assign_role(role, now);
            self.users.update(&user).await?;
            updated.push(UserView::from(&user));
        }

        tracing::info!(role = %role, updated = updated.len(), "roles updated");
        Ok(updated)
    }
}
