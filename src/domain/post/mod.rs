//! Post module - blog posts and their publication lifecycle.

mod aggregate;

pub use aggregate::{
    Post, DEFAULT_EXCERPT_LENGTH, MIN_PUBLISH_CONTENT_LENGTH, MIN_TITLE_LENGTH,
};
