//! Token-bucket rate limiter.
//!
//! Each caller owns a bucket of `capacity` tokens that refills continuously
//! at `capacity` tokens per `window_ms`. A request spends one token; an
//! empty bucket denies. Bursts up to `capacity` are allowed after idle time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::RateLimitConfig;
use crate::domain::foundation::Timestamp;
use crate::ports::{
    AdmissionDecision, CallerId, Clock, RateLimitError, RateLimitStrategy, RateLimiter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bucket {
    tokens: u32,
    last_refill_ms: u64,
}

impl Bucket {
    fn full(capacity: u32, now_ms: u64) -> Self {
        Self {
            tokens: capacity,
            last_refill_ms: now_ms,
        }
    }

    /// Adds whole tokens earned since the last refill, capped at capacity.
    ///
    /// The refill mark always advances to `now_ms`, so fractional progress
    /// toward the next token is dropped. A clock that steps backwards earns
    /// nothing and leaves the mark where it was.
    fn refill(&mut self, capacity: u32, window_ms: u64, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.last_refill_ms);
        let earned = u128::from(elapsed) * u128::from(capacity) / u128::from(window_ms);
        let tokens = (u128::from(self.tokens) + earned).min(u128::from(capacity));
        self.tokens = u32::try_from(tokens).unwrap_or(capacity);
        self.last_refill_ms = self.last_refill_ms.max(now_ms);
    }
}

/// In-memory token-bucket limiter.
pub struct TokenBucketRateLimiter {
    capacity: u32,
    window_ms: u64,
    clock: Arc<dyn Clock>,
    buckets: Mutex<HashMap<CallerId, Bucket>>,
}

impl std::fmt::Debug for TokenBucketRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBucketRateLimiter")
            .field("capacity", &self.capacity)
            .field("window_ms", &self.window_ms)
            .finish_non_exhaustive()
    }
}

impl TokenBucketRateLimiter {
    /// Creates a limiter with buckets of `capacity` refilled every `window_ms`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if either value is zero
    pub fn new(
        capacity: u32,
        window_ms: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RateLimitError> {
        if capacity == 0 {
            return Err(RateLimitError::InvalidConfig(
                "token bucket capacity must be positive".to_string(),
            ));
        }
        if window_ms == 0 {
            return Err(RateLimitError::InvalidConfig(
                "token bucket refill window must be positive".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            window_ms,
            clock,
            buckets: Mutex::new(HashMap::new()),
        })
    }

    pub fn from_config(
        config: &RateLimitConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RateLimitError> {
        Self::new(config.limit(), config.window_ms, clock)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Refills, then spends one token if available.
    pub fn check_rate_limit(&self, caller: &CallerId) -> AdmissionDecision {
        self.admit(caller)
    }

    /// Drops the caller's bucket; the next request sees a full one.
    pub fn reset_rate_limit(&self, caller: &CallerId) {
        self.reset(caller);
    }

    /// Tokens held by the caller as of the last refill, if tracked.
    pub fn tokens(&self, caller: &CallerId) -> Option<u32> {
        self.lock().get(caller).map(|bucket| bucket.tokens)
    }

    /// Number of callers with a bucket.
    pub fn tracked_callers(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CallerId, Bucket>> {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RateLimiter for TokenBucketRateLimiter {
    fn admit(&self, caller: &CallerId) -> AdmissionDecision {
        let now_ms = self.clock.now().as_unix_millis();
        let reset_at = Timestamp::from_unix_millis(now_ms.saturating_add(self.window_ms));

        let mut buckets = self.lock();
        let bucket = buckets
            .entry(caller.clone())
            .or_insert_with(|| Bucket::full(self.capacity, now_ms));
        bucket.refill(self.capacity, self.window_ms, now_ms);

        if bucket.tokens == 0 {
            tracing::debug!(caller = %caller, capacity = self.capacity, "token bucket empty");
            return AdmissionDecision::denied(self.capacity, reset_at);
        }

        bucket.tokens -= 1;
        AdmissionDecision::allowed(self.capacity, bucket.tokens, reset_at)
    }

    fn reset(&self, caller: &CallerId) {
        self.lock().remove(caller);
    }

    fn strategy(&self) -> RateLimitStrategy {
        RateLimitStrategy::TokenBucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ManualClock;
    use proptest::prelude::*;

    fn caller(id: &str) -> CallerId {
        CallerId::new(id).unwrap()
    }

    fn limiter(capacity: u32, window_ms: u64, clock: &Arc<ManualClock>) -> TokenBucketRateLimiter {
        TokenBucketRateLimiter::new(capacity, window_ms, clock.clone()).unwrap()
    }

    // ─── Admission Sequence Tests ────────────────────────────────────

    #[test]
    fn burst_then_deny_then_refill() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(2, 1_000, &clock);
        let alice = caller("alice");

        let first = limiter.check_rate_limit(&alice);
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        let second = limiter.check_rate_limit(&alice);
        assert!(second.allowed);
        assert_eq!(second.remaining, 0);

        let third = limiter.check_rate_limit(&alice);
        assert!(!third.allowed);
        assert_eq!(third.remaining, 0);

        clock.set(1_000);
        let fourth = limiter.check_rate_limit(&alice);
        assert!(fourth.allowed);
        assert_eq!(fourth.remaining, 1);
    }

    #[test]
    fn long_idle_refills_to_capacity_only() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(5, 1_000, &clock);
        let alice = caller("alice");

        for _ in 0..5 {
            limiter.check_rate_limit(&alice);
        }
        clock.advance(10_000);

        let decision = limiter.check_rate_limit(&alice);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
    }

    #[test]
    fn partial_refill_earns_whole_tokens_only() {
        let clock = Arc::new(ManualClock::at(0));
        // One token per 600ms.
        let limiter = limiter(100, 60_000, &clock);
        let alice = caller("alice");

        for _ in 0..100 {
            limiter.check_rate_limit(&alice);
        }
        assert!(!limiter.check_rate_limit(&alice).allowed);

        clock.advance(599);
        assert!(!limiter.check_rate_limit(&alice).allowed);

        // The 599ms of progress was dropped when the mark moved.
        clock.advance(599);
        assert!(!limiter.check_rate_limit(&alice).allowed);

        clock.advance(600);
        let decision = limiter.check_rate_limit(&alice);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn reset_at_is_one_window_from_now() {
        let clock = Arc::new(ManualClock::at(5_000));
        let limiter = limiter(3, 1_000, &clock);

        let decision = limiter.check_rate_limit(&caller("alice"));
        assert_eq!(decision.limit, 3);
        assert_eq!(decision.reset_at.as_unix_millis(), 6_000);
    }

    #[test]
    fn clock_going_backwards_does_not_mint_tokens() {
        let clock = Arc::new(ManualClock::at(10_000));
        let limiter = limiter(1, 1_000, &clock);
        let alice = caller("alice");

        assert!(limiter.check_rate_limit(&alice).allowed);
        clock.set(5_000);
        assert!(!limiter.check_rate_limit(&alice).allowed);

        // Mark stayed at 10_000, so a full window past that refills.
        clock.set(11_000);
        assert!(limiter.check_rate_limit(&alice).allowed);
    }

    // ─── Reset Tests ─────────────────────────────────────────────────

    #[test]
    fn reset_behaves_like_unseen_caller() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(3, 1_000, &clock);
        let alice = caller("alice");

        for _ in 0..3 {
            limiter.check_rate_limit(&alice);
        }
        assert!(!limiter.check_rate_limit(&alice).allowed);

        limiter.reset_rate_limit(&alice);
        assert_eq!(limiter.tokens(&alice), None);

        let decision = limiter.check_rate_limit(&alice);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 2);
    }

    #[test]
    fn reset_unknown_caller_is_noop() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(3, 1_000, &clock);
        limiter.reset_rate_limit(&caller("ghost"));
        assert_eq!(limiter.tracked_callers(), 0);
    }

    #[test]
    fn callers_have_independent_buckets() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(1, 1_000, &clock);

        assert!(limiter.check_rate_limit(&caller("a")).allowed);
        assert!(!limiter.check_rate_limit(&caller("a")).allowed);
        assert!(limiter.check_rate_limit(&caller("b")).allowed);
        assert_eq!(limiter.tracked_callers(), 2);
    }

    #[test]
    fn zero_capacity_or_window_is_rejected() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at(0));
        assert!(TokenBucketRateLimiter::new(0, 1_000, clock.clone()).is_err());
        assert!(TokenBucketRateLimiter::new(1, 0, clock).is_err());
    }

    #[test]
    fn concurrent_burst_admits_exactly_capacity() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = Arc::new(limiter(64, 60_000, &clock));
        let alice = caller("alice");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                let alice = alice.clone();
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| limiter.check_rate_limit(&alice).allowed)
                        .count()
                })
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 64);
    }

    // ─── Invariant Properties ────────────────────────────────────────

    proptest! {
        #[test]
        fn remaining_never_exceeds_capacity(
            capacity in 1u32..50,
            window_ms in 1u64..10_000,
            steps in proptest::collection::vec(0u64..5_000, 1..60),
        ) {
            let clock = Arc::new(ManualClock::at(0));
            let limiter = limiter(capacity, window_ms, &clock);
            let alice = caller("alice");

            for step in steps {
                clock.advance(step);
                let decision = limiter.check_rate_limit(&alice);
                prop_assert!(decision.remaining < capacity);
                prop_assert_eq!(decision.limit, capacity);
                if !decision.allowed {
                    prop_assert_eq!(decision.remaining, 0);
                }
            }
        }

        #[test]
        fn admissions_bounded_by_capacity_plus_refill(
            capacity in 1u32..20,
            window_ms in 100u64..5_000,
            requests in 1usize..200,
            tick in 0u64..50,
        ) {
            let clock = Arc::new(ManualClock::at(0));
            let limiter = limiter(capacity, window_ms, &clock);
            let alice = caller("alice");

            let mut admitted = 0u64;
            for _ in 0..requests {
                clock.advance(tick);
                if limiter.check_rate_limit(&alice).allowed {
                    admitted += 1;
                }
            }

            let elapsed = clock.now_ms();
            let bound = u64::from(capacity) + elapsed * u64::from(capacity) / window_ms;
            prop_assert!(admitted <= bound);
        }
    }
}
