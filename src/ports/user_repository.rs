//! User repository port.
//!
//! Defines the contract for storing and retrieving user accounts.
//! Identifiers are allocated by the repository so that they stay
//! sequential per store instance.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{User, UserStatus};

/// Criteria for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Only users with this status.
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.status.map_or(true, |status| user.status() == status)
    }
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Reserve the next unused id (starting at 1).
    async fn next_id(&self) -> Result<UserId, DomainError>;

    /// Store a newly registered user.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Replace an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no user has this id
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Remove a user. Returns whether one was removed.
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// List users matching the filter, ordered by id.
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(UserFilter::default().status, None);
    }
}
