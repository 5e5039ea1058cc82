//! GetPostHandler - Query handler for a single post.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, PostId};
use crate::domain::post::Post;
use crate::ports::PostRepository;

/// Query to get a post by ID.
#[derive(Debug, Clone, Copy)]
pub struct GetPostQuery {
    pub post_id: PostId,
}

/// Handler for retrieving posts.
pub struct GetPostHandler {
    posts: Arc<dyn PostRepository>,
}

impl GetPostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, query: GetPostQuery) -> Result<Post, DomainError> {
        self.posts.find_by_id(query.post_id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::PostNotFound, format!("Post {}", query.post_id))
        })
    }
}
