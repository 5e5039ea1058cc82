//! ResetPreferencesHandler - Command handler restoring default preferences.

use std::sync::Arc;

use super::require_user;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preferences::Preferences;
use crate::ports::{PreferencesRepository, UserRepository};

#[derive(Debug, Clone, Copy)]
pub struct ResetPreferencesCommand {
    pub user_id: UserId,
}

pub struct ResetPreferencesHandler {
    users: Arc<dyn UserRepository>,
    preferences: Arc<dyn PreferencesRepository>,
}

impl ResetPreferencesHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        preferences: Arc<dyn PreferencesRepository>,
    ) -> Self {
        Self { users, preferences }
    }

    /// Forgets stored preferences and returns the defaults.
    pub async fn handle(&self, cmd: ResetPreferencesCommand) -> Result<Preferences, DomainError> {
        require_user(self.users.as_ref(), cmd.user_id).await?;
        self.preferences.remove(cmd.user_id).await?;
        tracing::debug!(user_id = %cmd.user_id, "preferences reset");
        Ok(Preferences::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::preferences::test_support::seeded;
    use crate::domain::preferences::Theme;

    #[tokio::test]
    async fn reset_returns_defaults_and_clears_storage() {
        let (users, preferences, id) = seeded().await;
        preferences
            .save(
                id,
                &Preferences {
                    theme: Theme::Dark,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let handler = ResetPreferencesHandler::new(users, preferences.clone());

        let prefs = handler.handle(ResetPreferencesCommand { user_id: id }).await.unwrap();
        assert_eq!(prefs, Preferences::default());
        assert!(preferences.find(id).await.unwrap().is_none());
    }
}
