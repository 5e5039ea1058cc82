//! In-memory session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionToken, UserId};
use crate::domain::session::Session;
use crate::ports::SessionStore;

/// Token-keyed session map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not yet removed) sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token: &SessionToken, session: Session) -> Result<(), DomainError> {
        self.sessions.write().await.insert(token.clone(), session);
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &SessionToken) -> Result<bool, DomainError> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }

    async fn remove_for_user(&self, user_id: UserId) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id() != user_id);
        Ok(before - sessions.len())
    }
}
