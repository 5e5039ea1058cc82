//! Response projections returned by handlers.
//!
//! Views are what leaves the application layer: they omit secrets (the
//! password hash) and add derived fields such as `display_name`.

use serde::Serialize;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::preferences::Preferences;
use crate::domain::user::{Role, User, UserStatus};

/// Format version stamped on preference responses.
pub const PREFERENCES_VERSION: &str = "2.0";

/// Public view of a user account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub display_name: String,
    pub phone: Option<String>,
    pub status: UserStatus,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub password_reset_at: Option<Timestamp>,
    pub require_password_change: bool,
    pub role_updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl UserView {
    /// Attaches the user's effective preferences.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = Some(preferences);
        self
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            name: user.name().map(str::to_string),
            display_name: user.display_name().to_string(),
            phone: user.phone().map(|p| p.display()),
            status: user.status(),
            role: user.role(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
            password_reset_at: user.password_reset_at(),
            require_password_change: user.require_password_change(),
            role_updated_at: user.role_updated_at(),
            preferences: None,
        }
    }
}

/// Preferences plus response metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferencesView {
    #[serde(flatten)]
    pub preferences: Preferences,
    pub last_updated: Timestamp,
    pub version: &'static str,
}

impl PreferencesView {
    pub fn new(preferences: Preferences, last_updated: Timestamp) -> Self {
        Self {
            preferences,
            last_updated,
            version: PREFERENCES_VERSION,
        }
    }
}

/// Uniform error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub error: bool,
    pub code: String,
    pub message: String,
    pub timestamp: Timestamp,
}

impl ErrorView {
    pub fn from_error(err: &DomainError, now: Timestamp) -> Self {
        Self {
            error: true,
            code: err.code.to_string(),
            message: err.message.clone(),
            timestamp: now,
        }
    }
}
