//! UpdatePreferencesHandler - Command handler for merging preference changes.

use std::sync::Arc;

use serde_json::Value;

use super::require_user;
use crate::application::views::PreferencesView;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preferences::PreferencesPatch;
use crate::ports::{Clock, PreferencesRepository, UserRepository};

/// Command carrying raw JSON changes, validated key by key.
#[derive(Debug, Clone)]
pub struct UpdatePreferencesCommand {
    pub user_id: UserId,
    pub changes: Value,
}

pub struct UpdatePreferencesHandler {
    users: Arc<dyn UserRepository>,
    preferences: Arc<dyn PreferencesRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdatePreferencesHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        preferences: Arc<dyn PreferencesRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            preferences,
            clock,
        }
    }

    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    /// - `InvalidFormat` if any known key has an invalid value; nothing is saved
    pub async fn handle(
        &self,
        cmd: UpdatePreferencesCommand,
    ) -> Result<PreferencesView, DomainError> {
        require_user(self.users.as_ref(), cmd.user_id).await?;
        let patch = PreferencesPatch::from_json(&cmd.changes)?;

        let current = self
            .preferences
            .find(cmd.user_id)
            .await?
            .unwrap_or_default();
        let updated = current.merged(patch);
        self.preferences.save(cmd.user_id, &updated).await?;

        tracing::debug!(user_id = %cmd.user_id, "preferences updated");
        Ok(PreferencesView::new(updated, self.clock.now()))
    }
}
