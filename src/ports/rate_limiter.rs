//! Rate limiting port for protecting the application from request floods.
//!
//! This port defines the admission contract shared by every limiting
//! strategy. Implementations keep per-caller state in memory and decide
//! synchronously; the check and the consumption of quota are one atomic
//! step per call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Port for rate limiting operations.
///
/// Implementations must be thread-safe. Admission never fails: a backend
/// that cannot decide is a construction-time error, not a request-time one.
pub trait RateLimiter: Send + Sync {
    /// Decides whether the caller may proceed, consuming quota if so.
    fn admit(&self, caller: &CallerId) -> AdmissionDecision;

    /// Clears all state for a caller (operator override).
    ///
    /// Idempotent: resetting an unseen caller is a no-op.
    fn reset(&self, caller: &CallerId);

    /// The algorithm behind this limiter.
    fn strategy(&self) -> RateLimitStrategy;
}

/// Identity a rate limit is applied to.
///
/// Usually a user id, but any non-empty string key works (API key, IP).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(String);

impl CallerId {
    /// Creates a caller id, rejecting empty strings.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("caller_id"));
        }
        Ok(Self(id))
    }

    /// Returns the key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<UserId> for CallerId {
    fn from(user_id: UserId) -> Self {
        Self(user_id.to_string())
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdmissionDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Maximum requests (or tokens) per window.
    pub limit: u32,
    /// Quota left after this call.
    pub remaining: u32,
    /// Upper bound on when quota is replenished.
    pub reset_at: Timestamp,
}

impl AdmissionDecision {
    /// Builds an allowing decision.
    pub fn allowed(limit: u32, remaining: u32, reset_at: Timestamp) -> Self {
        Self {
            allowed: true,
            limit,
            remaining,
            reset_at,
        }
    }

    /// Builds a denying decision with no remaining quota.
    pub fn denied(limit: u32, reset_at: Timestamp) -> Self {
        Self {
            allowed: false,
            limit,
            remaining: 0,
            reset_at,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Milliseconds from `now` until `reset_at`, at least 1 when denied.
    pub fn retry_after_ms(&self, now: Timestamp) -> u64 {
        let wait = self
            .reset_at
            .as_unix_millis()
            .saturating_sub(now.as_unix_millis());
        if self.allowed {
            wait
        } else {
            wait.max(1)
        }
    }
}

/// The algorithm a limiter uses.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStrategy {
    /// Epoch-aligned counting windows.
    FixedWindow,
    /// Continuously refilled token bucket.
    #[default]
    TokenBucket,
}

impl RateLimitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitStrategy::FixedWindow => "fixed_window",
            RateLimitStrategy::TokenBucket => "token_bucket",
        }
    }
}

impl fmt::Display for RateLimitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RateLimitStrategy {
    type Err = RateLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed_window" | "fixed-window" => Ok(RateLimitStrategy::FixedWindow),
            "token_bucket" | "token-bucket" => Ok(RateLimitStrategy::TokenBucket),
            other => Err(RateLimitError::InvalidConfig(format!(
                "unknown strategy '{}'",
                other
            ))),
        }
    }
}

/// Errors raised while building a rate limiter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    /// Limits that would make admission meaningless (zero capacity or window).
    #[error("invalid rate limit configuration: {0}")]
    InvalidConfig(String),
}
