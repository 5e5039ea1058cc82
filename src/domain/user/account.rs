//! User account aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

use super::values::{Email, Password, PasswordHash, PhoneNumber};

/// Whether an account may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative role assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("Invalid role: {}", other),
            )),
        }
    }
}

/// Partial update applied by `update_user`.
///
/// Fields left as `None` are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<UserStatus>,
}

impl UserPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.status.is_none()
    }
}

/// A registered user.
///
/// # Invariants
///
/// - `email` is syntactically valid
/// - the plaintext password is never stored, only its salted hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    name: Option<String>,
    phone: Option<PhoneNumber>,
    password_hash: PasswordHash,
    status: UserStatus,
    role: Role,
    created_at: Timestamp,
    updated_at: Option<Timestamp>,
    password_reset_at: Option<Timestamp>,
    require_password_change: bool,
    role_updated_at: Option<Timestamp>,
}

impl User {
    /// Registers a new active user.
    pub fn register(
        id: UserId,
        email: Email,
        password: &Password,
        name: Option<String>,
        now: Timestamp,
    ) -> Self {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Self {
            id,
            email,
            name,
            phone: None,
            password_hash: password.hash(),
            status: UserStatus::Active,
            role: Role::User,
            created_at: now,
            updated_at: None,
            password_reset_at: None,
            require_password_change: false,
            role_updated_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    pub fn password_reset_at(&self) -> Option<Timestamp> {
        self.password_reset_at
    }

    pub fn require_password_change(&self) -> bool {
        self.require_password_change
    }

    pub fn role_updated_at(&self) -> Option<Timestamp> {
        self.role_updated_at
    }

    /// Name if set, otherwise the email local part.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.email.local_part())
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Whole days since registration, rounded up.
    pub fn account_age_days(&self, now: Timestamp) -> i64 {
        let millis = now.duration_since(&self.created_at).num_milliseconds().abs();
        const DAY_MS: i64 = 24 * 60 * 60 * 1000;
        (millis + DAY_MS - 1) / DAY_MS
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a validated partial update.
    ///
    /// Nothing is changed if any field fails validation.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` for a malformed email or phone number
    pub fn apply(&mut self, patch: UserPatch, now: Timestamp) -> Result<(), ValidationError> {
        let email = patch.email.map(Email::parse).transpose()?;
        let phone = patch.phone.map(PhoneNumber::parse).transpose()?;

        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = Some(phone);
        }
        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            self.name = (!name.is_empty()).then_some(name);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = Some(now);
        Ok(())
    }

    /// Marks the account inactive.
    pub fn deactivate(&mut self, now: Timestamp) {
        self.status = UserStatus::Inactive;
        self.updated_at = Some(now);
    }

    /// Replaces the password and forces a change on next login.
    pub fn reset_password(&mut self, password: &Password, now: Timestamp) {
        self.password_hash = password.hash();
        self.password_reset_at = Some(now);
        self.require_password_change = true;
        self.updated_at = Some(now);
    }

    /// Assigns a new role.
    pub fn assign_role(&mut self, role: Role, now: Timestamp) {
        self.role = role;
        self.role_updated_at = Some(now);
        self.updated_at = Some(now);
    }
}
