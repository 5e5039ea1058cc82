//! Preference handlers.
//!
//! Every operation requires the user to exist. A user without stored
//! preferences sees the defaults.

mod get_preferences;
mod reset_preferences;
mod update_preferences;

pub use get_preferences::{GetPreferencesHandler, GetPreferencesQuery};
pub use reset_preferences::{ResetPreferencesCommand, ResetPreferencesHandler};
pub use update_preferences::{UpdatePreferencesCommand, UpdatePreferencesHandler};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::UserRepository;

async fn require_user(users: &dyn UserRepository, user_id: UserId) -> Result<(), DomainError> {
    match users.find_by_id(user_id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::not_found(ErrorCode::UserNotFound, "User")),
    }
}
