//! Preferences repository port.
//!
//! Only explicitly saved preferences are stored; absence means defaults.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preferences::Preferences;

#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Saved preferences, or `None` if the user never changed them.
    async fn find(&self, user_id: UserId) -> Result<Option<Preferences>, DomainError>;

    /// Store preferences, replacing any previous value.
    async fn save(&self, user_id: UserId, preferences: &Preferences) -> Result<(), DomainError>;

    /// Drop saved preferences. Returns whether any were stored.
    async fn remove(&self, user_id: UserId) -> Result<bool, DomainError>;
}
