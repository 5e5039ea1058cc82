//! PublishPostHandler - Command handler for publishing drafts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, PostId};
use crate::domain::post::Post;
use crate::ports::{Clock, PostRepository};

/// Command to publish a post.
#[derive(Debug, Clone, Copy)]
pub struct PublishPostCommand {
    pub post_id: PostId,
}

/// Handler for publishing posts.
pub struct PublishPostHandler {
    posts: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
}

impl PublishPostHandler {
    pub fn new(posts: Arc<dyn PostRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }

    pub async fn handle(&self, cmd: PublishPostCommand) -> Result<Post, DomainError> {
        let mut post = self.posts.find_by_id(cmd.post_id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::PostNotFound, format!("Post {}", cmd.post_id))
        })?;

        post.publish(self.clock.now())?;
        self.posts.update(&post).await?;

        tracing::info!(post_id = %cmd.post_id, "post published");
        Ok(post)
    }
}
