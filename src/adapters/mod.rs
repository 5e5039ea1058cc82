//! Adapters - Implementations of port interfaces.
//!
//! - `clock` - system and manual clocks
//! - `memory` - in-memory stores for users, posts, sessions, preferences
//! - `rate_limiter` - fixed-window and token-bucket limiters

mod clock;
pub mod memory;
pub mod rate_limiter;

pub use clock::{ManualClock, SystemClock};
pub use memory::{
    InMemoryPostRepository, InMemoryPreferencesRepository, InMemorySessionStore,
    InMemoryUserRepository,
};
pub use rate_limiter::{
    EvictionSweeper, FixedWindowRateLimiter, RateLimiterStrategy, TokenBucketRateLimiter,
};
