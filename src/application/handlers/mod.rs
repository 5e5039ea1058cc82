//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports. Each handler owns `Arc`s to the ports it needs and exposes a
//! single `handle` method.

pub mod admin;
pub mod auth;
pub mod post;
pub mod preferences;
pub mod rate_limit;
pub mod user;

pub use admin::{
    BulkUpdateRolesCommand, BulkUpdateRolesHandler, ResetRateLimitCommand, ResetRateLimitHandler,
    ResetUserPasswordCommand, ResetUserPasswordHandler,
};
pub use auth::{
    CreateSessionCommand, CreateSessionHandler, LogoutCommand, LogoutHandler,
    ValidateSessionHandler, ValidateSessionQuery,
};
pub use post::{
    CreatePostCommand, CreatePostHandler, GetPostHandler, GetPostQuery, ListPostsHandler,
    ListPostsOptions, ListPostsQuery, PostSort, PublishPostCommand, PublishPostHandler,
};
pub use preferences::{
    GetPreferencesHandler, GetPreferencesQuery, ResetPreferencesCommand, ResetPreferencesHandler,
    UpdatePreferencesCommand, UpdatePreferencesHandler,
};
pub use rate_limit::CheckRateLimitHandler;
pub use user::{
    CreateUserCommand, CreateUserHandler, DeleteUserCommand, DeleteUserHandler, GetUserHandler,
    GetUserQuery, ListUsersHandler, ListUsersQuery, UpdateUserCommand, UpdateUserHandler,
};
