//! Rate limit handlers.

mod check_rate_limit;

pub use check_rate_limit::CheckRateLimitHandler;
