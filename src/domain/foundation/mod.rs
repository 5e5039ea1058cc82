//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the Pressroom domain.

mod errors;
mod ids;
mod text;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{validate_id, PostId, SessionToken, UserId};
pub use text::{sanitize_input, to_title_case, truncate_text};
pub use timestamp::Timestamp;
