//! Strategy selection: one limiter value chosen from configuration.

use std::sync::Arc;

use super::{FixedWindowRateLimiter, TokenBucketRateLimiter};
use crate::config::RateLimitConfig;
use crate::ports::{
    AdmissionDecision, CallerId, Clock, RateLimitError, RateLimitStrategy, RateLimiter,
};

/// The configured limiter, fixed for the process lifetime.
#[derive(Debug)]
pub enum RateLimiterStrategy {
    FixedWindow(FixedWindowRateLimiter),
    TokenBucket(TokenBucketRateLimiter),
}

impl RateLimiterStrategy {
    /// Builds the limiter named by `config.strategy`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the limit or window is zero
    pub fn from_config(
        config: &RateLimitConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RateLimitError> {
        let limiter = match config.strategy {
            RateLimitStrategy::FixedWindow => {
                Self::FixedWindow(FixedWindowRateLimiter::from_config(config, clock)?)
            }
            RateLimitStrategy::TokenBucket => {
                Self::TokenBucket(TokenBucketRateLimiter::from_config(config, clock)?)
            }
        };
        tracing::info!(
            strategy = %limiter.strategy(),
            limit = config.limit(),
            window_ms = config.window_ms,
            "rate limiter configured"
        );
        Ok(limiter)
    }

    /// Removes stale fixed-window counters. Buckets never go stale.
    pub fn evict_stale(&self) -> usize {
        match self {
            Self::FixedWindow(limiter) => limiter.evict_stale(),
            Self::TokenBucket(_) => 0,
        }
    }

    fn inner(&self) -> &dyn RateLimiter {
        match self {
            Self::FixedWindow(limiter) => limiter,
            Self::TokenBucket(limiter) => limiter,
        }
    }
}

impl RateLimiter for RateLimiterStrategy {
    fn admit(&self, caller: &CallerId) -> AdmissionDecision {
        self.inner().admit(caller)
    }

    fn reset(&self, caller: &CallerId) {
        self.inner().reset(caller)
    }

    fn strategy(&self) -> RateLimitStrategy {
        self.inner().strategy()
    }
}
