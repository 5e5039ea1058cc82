//! ListUsersHandler - Query handler for listing users.

use std::sync::Arc;

use crate::application::views::UserView;
use crate::domain::foundation::DomainError;
use crate::domain::user::UserStatus;
use crate::ports::{PreferencesRepository, UserFilter, UserRepository};

/// Query to list users.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListUsersQuery {
    /// Only users with this status.
    pub status: Option<UserStatus>,
    /// Attach each user's effective preferences.
    pub include_preferences: bool,
}

/// Handler for listing users.
pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
    preferences: Arc<dyn PreferencesRepository>,
}

impl ListUsersHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        preferences: Arc<dyn PreferencesRepository>,
    ) -> Self {
        Self { users, preferences }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Vec<UserView>, DomainError> {
        let filter = UserFilter {
            status: query.status,
        };
        let users = self.users.list(&filter).await?;

        let mut views = Vec::with_capacity(users.len());
        for user in &users {
            let view = UserView::from(user);
            if query.include_preferences {
                let preferences = self.preferences.find(user.id()).await?.unwrap_or_default();
                views.push(view.with_preferences(preferences));
            } else {
                views.push(view);
            }
        }
        Ok(views)
    }
}
