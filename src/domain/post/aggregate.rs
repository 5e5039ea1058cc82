//! Post aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{sanitize_input, PostId, Timestamp, UserId, ValidationError};

/// Minimum length for a post title.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Minimum content length required before a post can be published.
pub const MIN_PUBLISH_CONTENT_LENGTH: usize = 10;

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 100;

/// A blog post.
///
/// # Invariants
///
/// - `title` is at least 3 characters before sanitization
/// - `title` and `content` are stored HTML-escaped
/// - `published_at` is set iff `published` is true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    author_id: UserId,
    published: bool,
    created_at: Timestamp,
    published_at: Option<Timestamp>,
}

impl Post {
    /// Creates an unpublished draft.
    ///
    /// # Errors
    ///
    /// - `TooShort` if the title has fewer than 3 characters
    pub fn draft(
        id: PostId,
        title: &str,
        content: &str,
        author_id: UserId,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        Self::validate_title(title)?;

        Ok(Self {
            id,
            title: sanitize_input(title),
            content: sanitize_input(content),
            author_id,
            published: false,
            created_at: now,
            published_at: None,
        })
    }

    /// Checks the minimum title length.
    pub fn validate_title(title: &str) -> Result<(), ValidationError> {
        let title_len = title.chars().count();
        if title_len < MIN_TITLE_LENGTH {
            return Err(ValidationError::too_short("title", MIN_TITLE_LENGTH, title_len));
        }
        Ok(())
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn published_at(&self) -> Option<Timestamp> {
        self.published_at
    }

    /// First `len` characters of the content, followed by `...` when cut.
    pub fn excerpt(&self, len: usize) -> String {
        if self.content.chars().count() <= len {
            return self.content.clone();
        }
        let mut excerpt: String = self.content.chars().take(len).collect();
        excerpt.push_str("...");
        excerpt
    }

    /// Publishes the post. Publishing twice keeps the first timestamp.
    ///
    /// # Errors
    ///
    /// - `TooShort` if content is under [`MIN_PUBLISH_CONTENT_LENGTH`]
    pub fn publish(&mut self, now: Timestamp) -> Result<(), ValidationError> {
        let content_len = self.content.chars().count();
        if content_len < MIN_PUBLISH_CONTENT_LENGTH {
            return Err(ValidationError::too_short(
                "content",
                MIN_PUBLISH_CONTENT_LENGTH,
                content_len,
            ));
        }
        if !self.published {
            self.published = true;
            self.published_at = Some(now);
        }
        Ok(())
    }
}
