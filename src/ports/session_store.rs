//! Session store port.
//!
//! Maps bearer tokens to server-side session state. Expiry policy lives in
//! the application layer; the store only keeps and forgets entries.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionToken, UserId};
use crate::domain::session::Session;

/// Storage for authenticated sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session under its token.
    async fn insert(&self, token: &SessionToken, session: Session) -> Result<(), DomainError>;

    /// Look up a session.
    async fn get(&self, token: &SessionToken) -> Result<Option<Session>, DomainError>;

    /// Forget a session. Returns whether one was present.
    async fn remove(&self, token: &SessionToken) -> Result<bool, DomainError>;

    /// Forget every session belonging to the given user. Returns the count removed.
    async fn remove_for_user(&self, user_id: UserId) -> Result<usize, DomainError>;
}
