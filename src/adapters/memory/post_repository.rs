//! In-memory post repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PostId};
use crate::domain::post::Post;
use crate::ports::{PostFilter, PostRepository};

/// In-memory storage for posts, ordered by id.
#[derive(Debug, Clone)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<BTreeMap<PostId, Post>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of stored posts
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn next_id(&self) -> Result<PostId, DomainError> {
        let raw = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(PostId::new(raw)?)
    }

    async fn save(&self, post: &Post) -> Result<(), DomainError> {
        self.posts.write().await.insert(post.id(), post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id()) {
            Some(stored) => {
                *stored = post.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::PostNotFound,
                format!("Post {}", post.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};

    async fn draft(repo: &InMemoryPostRepository, author: u64) -> Post {
        let id = repo.next_id().await.unwrap();
        let post = Post::draft(
            id,
            "A title",
            "Some body content here",
            UserId::new(author).unwrap(),
            Timestamp::now(),
        )
        .unwrap();
        repo.save(&post).await.unwrap();
        post
    }

    #[tokio::test]
    async fn save_find_and_count() {
        let repo = InMemoryPostRepository::new();
        let post = draft(&repo, 1).await;

        assert_eq!(repo.find_by_id(post.id()).await.unwrap(), Some(post));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn update_persists_publication() {
        let repo = InMemoryPostRepository::new();
        let mut post = draft(&repo, 1).await;
        post.publish(Timestamp::now()).unwrap();
        repo.update(&post).await.unwrap();

        let stored = repo.find_by_id(post.id()).await.unwrap().unwrap();
        assert!(stored.is_published());
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let orphan = Post::draft(
            PostId::new(7).unwrap(),
            "Orphan",
            "",
            UserId::new(1).unwrap(),
            Timestamp::now(),
        )
        .unwrap();

        let err = repo.update(&orphan).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PostNotFound);
    }

    #[tokio::test]
    async fn list_filters_by_author_and_state() {
        let repo = InMemoryPostRepository::new();
        draft(&repo, 1).await;
        let mut published = draft(&repo, 1).await;
        published.publish(Timestamp::now()).unwrap();
        repo.update(&published).await.unwrap();
        draft(&repo, 2).await;

        let by_author = repo
            .list(&PostFilter {
                author_id: Some(UserId::new(1).unwrap()),
                published: None,
            })
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);

        let live = repo
            .list(&PostFilter {
                author_id: None,
                published: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id(), published.id());
    }
}
