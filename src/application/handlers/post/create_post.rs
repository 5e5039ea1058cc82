//! CreatePostHandler - Command handler for drafting posts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::post::Post;
use crate::ports::{Clock, PostRepository};

/// Command to create an unpublished post.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

/// Handler for creating posts.
pub struct CreatePostHandler {
    posts: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
}

impl CreatePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<Post, DomainError> {
        Post::validate_title(&cmd.title)?;

        let id = self.posts.next_id().await?;
        let post = Post::draft(id, &cmd.title, &cmd.content, cmd.author_id, self.clock.now())?;
        self.posts.save(&post).await?;

        tracing::info!(post_id = %id, author_id = %cmd.author_id, "post drafted");
        Ok(post)
    }
}
