//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::session::DEFAULT_SESSION_TTL_MS;

/// Longest accepted session lifetime (one year).
pub const MAX_SESSION_TTL_MS: u64 = 365 * DEFAULT_SESSION_TTL_MS;

/// Authentication configuration (bearer sessions)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in milliseconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_ms: u64,
}

impl AuthConfig {
    /// Get session TTL as Duration
    pub fn session_ttl(&self) -> Duration {
        Duration::from_millis(self.session_ttl_ms)
    }

    /// Validate authentication configuration
    ///
    /// The TTL must be non-zero and at most [`MAX_SESSION_TTL_MS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_ttl_ms == 0 || self.session_ttl_ms > MAX_SESSION_TTL_MS {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_ms: default_session_ttl(),
        }
    }
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_MS
}
