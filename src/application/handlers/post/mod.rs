//! Post handlers.

mod create_post;
mod get_post;
mod list_posts;
mod publish_post;

pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use get_post::{GetPostHandler, GetPostQuery};
pub use list_posts::{ListPostsHandler, ListPostsOptions, ListPostsQuery, PostSort};
pub use publish_post::{PublishPostCommand, PublishPostHandler};
