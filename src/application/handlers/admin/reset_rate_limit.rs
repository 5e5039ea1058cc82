//! ResetRateLimitHandler - Operator override that clears a caller's quota state.

use std::sync::Arc;

use crate::ports::{CallerId, RateLimiter};

#[derive(Debug, Clone)]
pub struct ResetRateLimitCommand {
    pub caller: CallerId,
}

pub struct ResetRateLimitHandler {
    limiter: Arc<dyn RateLimiter>,
}

impl ResetRateLimitHandler {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }

    /// Idempotent; resetting an unseen caller does nothing.
    pub fn handle(&self, cmd: ResetRateLimitCommand) {
        self.limiter.reset(&cmd.caller);
        tracing::info!(
            caller = %cmd.caller,
            strategy = %self.limiter.strategy(),
            "rate limit reset by operator"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ManualClock, TokenBucketRateLimiter};

    #[test]
    fn reset_restores_full_quota() {
        let limiter = Arc::new(
            TokenBucketRateLimiter::new(1, 60_000, Arc::new(ManualClock::at(0))).unwrap(),
        );
        let caller = CallerId::new("api-key-1").unwrap();
        assert!(limiter.admit(&caller).allowed);
        assert!(limiter.admit(&caller).is_denied());

        let handler = ResetRateLimitHandler::new(limiter.clone());
        handler.handle(ResetRateLimitCommand {
            caller: caller.clone(),
        });
        handler.handle(ResetRateLimitCommand {
            caller: caller.clone(),
        });

        assert!(limiter.admit(&caller).allowed);
    }
}
