//! Authenticated session entity.
//!
//! A session binds an opaque bearer token to a user for a fixed lifetime.
//! Expired sessions are rejected and removed on the next validation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionToken, Timestamp, UserId};

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Server-side state behind a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    created_at: Timestamp,
    expires_at: Timestamp,
}

impl Session {
    /// Opens a session that expires `ttl_ms` after `now`.
    pub fn open(user_id: UserId, now: Timestamp, ttl_ms: u64) -> Self {
        Self {
            user_id,
            created_at: now,
            expires_at: now.plus_millis(ttl_ms),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// A session is expired strictly after its expiry instant.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(&self.expires_at)
    }

    /// Snapshot handed to callers of `validate_session`.
    pub fn info(&self, token: &SessionToken) -> SessionInfo {
        SessionInfo {
            token: token.clone(),
            user_id: self.user_id,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// Public view of a valid session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    #[serde(skip)]
    pub token: SessionToken,
    pub user_id: UserId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_unix_millis(millis)
    }

    #[test]
    fn open_sets_expiry_from_ttl() {
        let session = Session::open(UserId::new(1).unwrap(), at(1_000), 500);
        assert_eq!(session.expires_at(), at(1_500));
    }

    #[test]
    fn expiry_is_exclusive_of_the_deadline() {
        let session = Session::open(UserId::new(1).unwrap(), at(0), 100);
        assert!(!session.is_expired(at(100)));
        assert!(session.is_expired(at(101)));
    }

    #[test]
    fn default_ttl_is_one_day() {
        assert_eq!(DEFAULT_SESSION_TTL_MS, 86_400_000);
    }
}
