//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, text helpers)
//! - `user` - Accounts, credentials and roles
//! - `post` - Blog posts and publication
//! - `session` - Bearer-token authentication sessions
//! - `preferences` - Per-user settings

pub mod foundation;
pub mod post;
pub mod preferences;
pub mod session;
pub mod user;
