//! In-memory user repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{UserFilter, UserRepository};

/// In-memory storage for user accounts, ordered by id.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn next_id(&self) -> Result<UserId, DomainError> {
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(UserId::new(raw)?)
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.users.write().await.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::UserNotFound,
                format!("User {}", user.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::user::{Email, Password, UserStatus};

    async fn register(repo: &InMemoryUserRepository, email: &str) -> User {
        let id = repo.next_id().await.unwrap();
        let user = User::register(
            id,
            Email::parse(email).unwrap(),
            &Password::new("password123").unwrap(),
            None,
            Timestamp::now(),
        );
        repo.save(&user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.next_id().await.unwrap().value(), 1);
        assert_eq!(repo.next_id().await.unwrap().value(), 2);
    }

    #[tokio::test]
    async fn save_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = register(&repo, "a@example.com").await;

        let found = repo.find_by_id(user.id()).await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let ghost = User::register(
            UserId::new(99).unwrap(),
            Email::parse("ghost@example.com").unwrap(),
            &Password::new("password123").unwrap(),
            None,
            Timestamp::now(),
        );

        let err = repo.update(&ghost).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let repo = InMemoryUserRepository::new();
        let user = register(&repo, "a@example.com").await;

        assert!(repo.delete(user.id()).await.unwrap());
        assert!(!repo.delete(user.id()).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn list_filters_by_status_in_id_order() {
        let repo = InMemoryUserRepository::new();
        let first = register(&repo, "a@example.com").await;
        let mut second = register(&repo, "b@example.com").await;
        second.deactivate(Timestamp::now());
        repo.update(&second).await.unwrap();
        let third = register(&repo, "c@example.com").await;

        let all = repo.list(&UserFilter::default()).await.unwrap();
        let ids: Vec<u64> = all.iter().map(|u| u.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let active = repo
            .list(&UserFilter {
                status: Some(UserStatus::Active),
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id(), first.id());
        assert_eq!(active[1].id(), third.id());
    }
}
