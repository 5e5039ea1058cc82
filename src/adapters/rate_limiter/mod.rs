//! Rate limiter adapters.
//!
//! Implementations of the RateLimiter port.
//!
//! ## Available Adapters
//!
//! - `FixedWindowRateLimiter` - epoch-aligned per-window counters
//! - `TokenBucketRateLimiter` - continuously refilled buckets
//! - `RateLimiterStrategy` - whichever of the two configuration selects
//! - `EvictionSweeper` - background eviction for fixed-window counters
//!
//! ## Usage
//!
//! ```ignore
//! use pressroom::adapters::rate_limiter::RateLimiterStrategy;
//! use pressroom::adapters::SystemClock;
//! use pressroom::config::RateLimitConfig;
//!
//! let limiter = RateLimiterStrategy::from_config(
//!     &RateLimitConfig::fixed_window(50, 60_000),
//!     Arc::new(SystemClock),
//! )?;
//! ```

mod fixed_window;
mod strategy;
mod sweeper;
mod token_bucket;

pub use fixed_window::FixedWindowRateLimiter;
pub use strategy::RateLimiterStrategy;
pub use sweeper::EvictionSweeper;
pub use token_bucket::TokenBucketRateLimiter;
