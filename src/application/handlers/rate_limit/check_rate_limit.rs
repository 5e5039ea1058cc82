//! CheckRateLimitHandler - Admission check in front of protected operations.
//!
//! Converts a denial into a `RateLimited` error carrying the retry hint,
//! so callers can bail out with `?`.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AdmissionDecision, CallerId, Clock, RateLimiter};

/// Handler for checking a caller against the configured limiter.
pub struct CheckRateLimitHandler {
    limiter: Arc<dyn RateLimiter>,
    clock: Arc<dyn Clock>,
}

impl CheckRateLimitHandler {
    pub fn new(limiter: Arc<dyn RateLimiter>, clock: Arc<dyn Clock>) -> Self {
        Self { limiter, clock }
    }

    /// Admits the caller or returns `RateLimited`.
    ///
    /// Details on the error: `limit`, `remaining`, `retry_after_ms`, `reset_at`.
    pub fn handle(&self, caller: &CallerId) -> Result<AdmissionDecision, DomainError> {
        let decision = self.limiter.admit(caller);
        if decision.allowed {
            return Ok(decision);
        }

        let retry_after_ms = decision.retry_after_ms(self.clock.now());
        tracing::warn!(
            caller = %caller,
            strategy = %self.limiter.strategy(),
            limit = decision.limit,
            retry_after_ms,
            "rate limit exceeded"
        );

        Err(DomainError::new(ErrorCode::RateLimited, "Rate limit exceeded")
            .with_detail("limit", decision.limit.to_string())
            .with_detail("remaining", decision.remaining.to_string())
            .with_detail("retry_after_ms", retry_after_ms.to_string())
            .with_detail("reset_at", decision.reset_at.to_rfc3339()))
    }
}
