//! In-memory preferences repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preferences::Preferences;
use crate::ports::PreferencesRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferencesRepository {
    preferences: Arc<RwLock<HashMap<UserId, Preferences>>>,
}

impl InMemoryPreferencesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryPreferencesRepository {
    async fn find(&self, user_id: UserId) -> Result<Option<Preferences>, DomainError> {
        Ok(self.preferences.read().await.get(&user_id).cloned())
    }

    async fn save(&self, user_id: UserId, preferences: &Preferences) -> Result<(), DomainError> {
        self.preferences
            .write()
            .await
            .insert(user_id, preferences.clone());
        Ok(())
    }

    async fn remove(&self, user_id: UserId) -> Result<bool, DomainError> {
        Ok(self.preferences.write().await.remove(&user_id).is_some())
    }
}
