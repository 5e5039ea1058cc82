//! ListPostsHandler - Query handler for filtered, sorted post listings.

use std::cmp::Reverse;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::foundation::DomainError;
use crate::domain::post::Post;
use crate::ports::{PostFilter, PostRepository};

/// Sort orders for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    /// Newest first by creation time.
    Date,
}

/// Sorting and truncation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ListPostsOptions {
    pub sort_by: Option<PostSort>,
    /// Maximum number of posts. `Some(0)` means no limit.
    pub limit: Option<usize>,
}

/// Query to list posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListPostsQuery {
    pub filter: PostFilter,
    pub options: ListPostsOptions,
}

/// Handler for listing posts.
pub struct ListPostsHandler {
    posts: Arc<dyn PostRepository>,
}

impl ListPostsHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.list(&query.filter).await?;

        if query.options.sort_by == Some(PostSort::Date) {
            posts.sort_by_key(|post| Reverse(post.created_at()));
        }
        if let Some(limit) = query.options.limit.filter(|limit| *limit > 0) {
            posts.truncate(limit);
        }
        Ok(posts)
    }
}
