//! Rate limit configuration
//!
//! Selects the limiting strategy and its limits. Values are read once at
//! startup and are not mutable at runtime.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::ports::RateLimitStrategy;

/// Default window length (one minute).
pub const DEFAULT_WINDOW_MS: u64 = 60_000;

/// Default per-window cap for the fixed-window strategy.
pub const DEFAULT_FIXED_WINDOW_LIMIT: u32 = 50;

/// Default bucket capacity for the token-bucket strategy.
pub const DEFAULT_TOKEN_BUCKET_CAPACITY: u32 = 100;

/// How stale fixed-window entries are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionMode {
    /// Scan and evict on every admitted request.
    #[default]
    Inline,
    /// Evict from a periodic background task; the request path never scans.
    Background,
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateLimitConfig {
    /// Which algorithm to run
    #[serde(default)]
    pub strategy: RateLimitStrategy,

    /// Window length in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Requests per window (fixed-window) or bucket capacity (token-bucket).
    /// Falls back to the strategy's default when unset.
    #[serde(default)]
    pub max_requests: Option<u32>,

    /// Fixed-window eviction mode
    #[serde(default)]
    pub eviction: EvictionMode,

    /// Background sweep period in milliseconds
    #[serde(default = "default_window_ms")]
    pub sweep_interval_ms: u64,
}

impl RateLimitConfig {
    /// Fixed-window configuration with explicit limits.
    pub fn fixed_window(limit: u32, window_ms: u64) -> Self {
        Self {
            strategy: RateLimitStrategy::FixedWindow,
            window_ms,
            max_requests: Some(limit),
            ..Default::default()
        }
    }

    /// Token-bucket configuration with explicit limits.
    pub fn token_bucket(capacity: u32, window_ms: u64) -> Self {
        Self {
            strategy: RateLimitStrategy::TokenBucket,
            window_ms,
            max_requests: Some(capacity),
            ..Default::default()
        }
    }

    /// Switch fixed-window eviction to a background sweep.
    pub fn with_background_eviction(mut self, sweep_interval_ms: u64) -> Self {
        self.eviction = EvictionMode::Background;
        self.sweep_interval_ms = sweep_interval_ms;
        self
    }

    /// The configured cap, or the strategy default.
    pub fn limit(&self) -> u32 {
        self.max_requests.unwrap_or(match self.strategy {
            RateLimitStrategy::FixedWindow => DEFAULT_FIXED_WINDOW_LIMIT,
            RateLimitStrategy::TokenBucket => DEFAULT_TOKEN_BUCKET_CAPACITY,
        })
    }

    /// Sweep period as a Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    /// Whether a background sweeper should run.
    pub fn needs_sweeper(&self) -> bool {
        self.strategy == RateLimitStrategy::FixedWindow && self.eviction == EvictionMode::Background
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_ms == 0 {
            return Err(ValidationError::InvalidWindow);
        }
        if self.limit() == 0 {
            return Err(ValidationError::InvalidRequestLimit);
        }
        if self.needs_sweeper() && self.sweep_interval_ms == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            strategy: RateLimitStrategy::default(),
            window_ms: default_window_ms(),
            max_requests: None,
            eviction: EvictionMode::default(),
            sweep_interval_ms: default_window_ms(),
        }
    }
}

fn default_window_ms() -> u64 {
    DEFAULT_WINDOW_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_token_bucket_of_100_per_minute() {
        let config = RateLimitConfig::default();
        assert_eq!(config.strategy, RateLimitStrategy::TokenBucket);
        assert_eq!(config.window_ms, 60_000);
        assert_eq!(config.limit(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fixed_window_default_limit_is_50() {
        let config = RateLimitConfig {
            strategy: RateLimitStrategy::FixedWindow,
            ..Default::default()
        };
        assert_eq!(config.limit(), 50);
    }

    #[test]
    fn explicit_limit_overrides_default() {
        assert_eq!(RateLimitConfig::token_bucket(2, 1_000).limit(), 2);
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = RateLimitConfig::fixed_window(10, 0);
        assert_eq!(config.validate(), Err(ValidationError::InvalidWindow));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = RateLimitConfig::token_bucket(0, 1_000);
        assert_eq!(config.validate(), Err(ValidationError::InvalidRequestLimit));
    }

    #[test]
    fn background_eviction_requires_interval() {
        let config = RateLimitConfig::fixed_window(10, 1_000).with_background_eviction(0);
        assert_eq!(config.validate(), Err(ValidationError::InvalidSweepInterval));
    }

    #[test]
    fn sweeper_only_for_fixed_window_background() {
        assert!(RateLimitConfig::fixed_window(10, 1_000)
            .with_background_eviction(500)
            .needs_sweeper());
        assert!(!RateLimitConfig::fixed_window(10, 1_000).needs_sweeper());
        assert!(!RateLimitConfig::token_bucket(10, 1_000)
            .with_background_eviction(500)
            .needs_sweeper());
    }
}
