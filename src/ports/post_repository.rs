//! Post repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PostId, UserId};
use crate::domain::post::Post;

/// Criteria for listing posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub author_id: Option<UserId>,
    pub published: Option<bool>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.author_id.map_or(true, |author| post.author_id() == author)
            && self
                .published
                .map_or(true, |published| post.is_published() == published)
    }
}

/// Repository port for post persistence.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Reserve the next unused id (starting at 1).
    async fn next_id(&self) -> Result<PostId, DomainError>;

    /// Store a new post.
    async fn save(&self, post: &Post) -> Result<(), DomainError>;

    /// Replace an existing post.
    ///
    /// # Errors
    ///
    /// - `PostNotFound` if no post has this id
    async fn update(&self, post: &Post) -> Result<(), DomainError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError>;

    /// List posts matching the filter in insertion (id) order.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError>;
}
