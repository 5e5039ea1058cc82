//! GetPreferencesHandler - Query handler for a user's effective preferences.

use std::sync::Arc;

use super::require_user;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preferences::Preferences;
use crate::ports::{PreferencesRepository, UserRepository};

#[derive(Debug, Clone, Copy)]
pub struct GetPreferencesQuery {
    pub user_id: UserId,
}

pub struct GetPreferencesHandler {
    users: Arc<dyn UserRepository>,
    preferences: Arc<dyn PreferencesRepository>,
}

impl GetPreferencesHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        preferences: Arc<dyn PreferencesRepository>,
    ) -> Self {
        Self { users, preferences }
    }

    /// Stored preferences, or the defaults if none were saved.
    pub async fn handle(&self, query: GetPreferencesQuery) -> Result<Preferences, DomainError> {
        require_user(self.users.as_ref(), query.user_id).await?;
        Ok(self
            .preferences
            .find(query.user_id)
            .await?
            .unwrap_or_default())
    }
}
