//! Fixed-window counter rate limiter.
//!
//! Time is cut into epoch-aligned windows of `window_ms`. Each caller gets
//! `limit` requests per window; the counter for a window is never reset,
//! a new window simply starts a new counter. Counters older than two
//! windows are evicted, either inline on each admitted request or by the
//! background sweeper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{EvictionMode, RateLimitConfig};
use crate::domain::foundation::Timestamp;
use crate::ports::{
    AdmissionDecision, CallerId, Clock, RateLimitError, RateLimitStrategy, RateLimiter,
};

/// Counter key: one entry per caller per window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowKey {
    caller: CallerId,
    window_start: u64,
}

/// In-memory fixed-window limiter.
pub struct FixedWindowRateLimiter {
    limit: u32,
    window_ms: u64,
    eviction: EvictionMode,
    clock: Arc<dyn Clock>,
    counters: Mutex<HashMap<WindowKey, u32>>,
}

impl std::fmt::Debug for FixedWindowRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowRateLimiter")
            .field("limit", &self.limit)
            .field("window_ms", &self.window_ms)
            .field("eviction", &self.eviction)
            .finish_non_exhaustive()
    }
}

impl FixedWindowRateLimiter {
    /// Creates a limiter allowing `limit` requests per `window_ms`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if either value is zero
    pub fn new(limit: u32, window_ms: u64, clock: Arc<dyn Clock>) -> Result<Self, RateLimitError> {
        if limit == 0 {
            return Err(RateLimitError::InvalidConfig(
                "fixed window limit must be positive".to_string(),
            ));
        }
        if window_ms == 0 {
            return Err(RateLimitError::InvalidConfig(
                "fixed window length must be positive".to_string(),
            ));
        }
        Ok(Self {
            limit,
            window_ms,
            eviction: EvictionMode::Inline,
            clock,
            counters: Mutex::new(HashMap::new()),
        })
    }

    /// Creates a limiter from application configuration.
    pub fn from_config(
        config: &RateLimitConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RateLimitError> {
        Ok(Self::new(config.limit(), config.window_ms, clock)?.with_eviction(config.eviction))
    }

    /// Selects how stale counters are removed.
    pub fn with_eviction(mut self, eviction: EvictionMode) -> Self {
        self.eviction = eviction;
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Records a request and reports whether it was allowed.
    pub fn check_rate_limit(&self, caller: &CallerId) -> bool {
        self.admit(caller).allowed
    }

    /// Requests counted for the caller in the current window (0 if none).
    pub fn request_count(&self, caller: &CallerId) -> u32 {
        let key = WindowKey {
            caller: caller.clone(),
            window_start: self.window_start(self.now_ms()),
        };
        self.lock().get(&key).copied().unwrap_or(0)
    }

    /// Removes counters for windows older than two window lengths.
    ///
    /// Returns the number of entries removed. Counters for the current and
    /// previous window are never touched.
    pub fn evict_stale(&self) -> usize {
        let now_ms = self.now_ms();
        let mut counters = self.lock();
        self.evict_before(&mut counters, now_ms)
    }

    /// Number of (caller, window) counters currently held.
    pub fn tracked_entries(&self) -> usize {
        self.lock().len()
    }

    fn evict_before(&self, counters: &mut HashMap<WindowKey, u32>, now_ms: u64) -> usize {
        let cutoff = now_ms.saturating_sub(self.window_ms.saturating_mul(2));
        let before = counters.len();
        counters.retain(|key, _| key.window_start >= cutoff);
        let removed = before - counters.len();
        if removed > 0 {
            tracing::trace!(removed, cutoff, "evicted stale rate limit windows");
        }
        removed
    }

    fn window_start(&self, now_ms: u64) -> u64 {
        (now_ms / self.window_ms) * self.window_ms
    }

    fn now_ms(&self) -> u64 {
        self.clock.now().as_unix_millis()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<WindowKey, u32>> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn admit(&self, caller: &CallerId) -> AdmissionDecision {
        let now_ms = self.now_ms();
        let window_start = self.window_start(now_ms);
        let reset_at = Timestamp::from_unix_millis(window_start.saturating_add(self.window_ms));
        let key = WindowKey {
            caller: caller.clone(),
            window_start,
        };

        let mut counters = self.lock();
        let count = counters.get(&key).copied().unwrap_or(0);
        if count >= self.limit {
            tracing::debug!(caller = %caller, count, limit = self.limit, "fixed window exhausted");
            return AdmissionDecision::denied(self.limit, reset_at);
        }

        let count = count + 1;
        counters.insert(key, count);
        if self.eviction == EvictionMode::Inline {
            self.evict_before(&mut counters, now_ms);
        }

        AdmissionDecision::allowed(self.limit, self.limit - count, reset_at)
    }

    fn reset(&self, caller: &CallerId) {
        let mut counters = self.lock();
        counters.retain(|key, _| &key.caller != caller);
    }

    fn strategy(&self) -> RateLimitStrategy {
        RateLimitStrategy::FixedWindow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ManualClock;

    fn caller(id: &str) -> CallerId {
        CallerId::new(id).unwrap()
    }

    fn limiter(limit: u32, window_ms: u64, clock: &Arc<ManualClock>) -> FixedWindowRateLimiter {
        FixedWindowRateLimiter::new(limit, window_ms, clock.clone()).unwrap()
    }

    // ─── Basic Functionality Tests ───────────────────────────────────

    #[test]
    fn first_request_is_allowed() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(50, 60_000, &clock);
        assert!(limiter.check_rate_limit(&caller("alice")));
        assert_eq!(limiter.request_count(&caller("alice")), 1);
    }

    #[test]
    fn denies_after_limit_and_recovers_in_next_window() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(50, 60_000, &clock);
        let alice = caller("alice");

        for i in 0..50 {
            assert!(limiter.check_rate_limit(&alice), "request {} should pass", i + 1);
        }
        assert!(!limiter.check_rate_limit(&alice));

        clock.set(60_001);
        assert!(limiter.check_rate_limit(&alice));
        assert_eq!(limiter.request_count(&alice), 1);
    }

    #[test]
    fn denied_requests_are_not_counted() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(2, 1_000, &clock);
        let alice = caller("alice");

        limiter.check_rate_limit(&alice);
        limiter.check_rate_limit(&alice);
        assert!(!limiter.check_rate_limit(&alice));
        assert!(!limiter.check_rate_limit(&alice));
        assert_eq!(limiter.request_count(&alice), 2);
    }

    #[test]
    fn windows_are_epoch_aligned() {
        let clock = Arc::new(ManualClock::at(59_999));
        let limiter = limiter(1, 60_000, &clock);
        let alice = caller("alice");

        assert!(limiter.check_rate_limit(&alice));
        assert!(!limiter.check_rate_limit(&alice));

        // One millisecond later is a new window, not 60s later.
        clock.set(60_000);
        assert!(limiter.check_rate_limit(&alice));
    }

    #[test]
    fn request_count_is_zero_for_unseen_caller() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(5, 1_000, &clock);
        assert_eq!(limiter.request_count(&caller("ghost")), 0);
    }

    // ─── Decision Shape Tests ────────────────────────────────────────

    #[test]
    fn decision_reports_remaining_and_window_end() {
        let clock = Arc::new(ManualClock::at(1_500));
        let limiter = limiter(3, 1_000, &clock);
        let alice = caller("alice");

        let decision = limiter.admit(&alice);
        assert!(decision.allowed);
        assert_eq!(decision.limit, 3);
        assert_eq!(decision.remaining, 2);
        assert_eq!(decision.reset_at.as_unix_millis(), 2_000);

        limiter.admit(&alice);
        limiter.admit(&alice);
        let denied = limiter.admit(&alice);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.reset_at.as_unix_millis(), 2_000);
    }

    // ─── Eviction Tests ──────────────────────────────────────────────

    #[test]
    fn inline_eviction_drops_windows_older_than_two_lengths() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(10, 1_000, &clock);

        limiter.check_rate_limit(&caller("old"));
        clock.set(1_000);
        limiter.check_rate_limit(&caller("recent"));
        assert_eq!(limiter.tracked_entries(), 2);

        // cutoff = 3_500 - 2_000 = 1_500, so windows 0 and 1_000 both go.
        clock.set(3_500);
        limiter.check_rate_limit(&caller("current"));
        assert_eq!(limiter.tracked_entries(), 1);
        assert_eq!(limiter.request_count(&caller("current")), 1);
    }

    #[test]
    fn previous_window_survives_eviction() {
        let clock = Arc::new(ManualClock::at(1_000));
        let limiter = limiter(10, 1_000, &clock);

        limiter.check_rate_limit(&caller("a"));
        clock.set(2_999);
        limiter.check_rate_limit(&caller("b"));
        assert_eq!(limiter.tracked_entries(), 2);
    }

    #[test]
    fn background_mode_skips_inline_scan() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(10, 1_000, &clock).with_eviction(EvictionMode::Background);

        limiter.check_rate_limit(&caller("old"));
        clock.set(10_000);
        limiter.check_rate_limit(&caller("new"));
        assert_eq!(limiter.tracked_entries(), 2);

        assert_eq!(limiter.evict_stale(), 1);
        assert_eq!(limiter.tracked_entries(), 1);
        assert_eq!(limiter.request_count(&caller("new")), 1);
    }

    #[test]
    fn evict_stale_keeps_current_window_count() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(10, 1_000, &clock).with_eviction(EvictionMode::Background);
        let alice = caller("alice");

        for _ in 0..4 {
            limiter.check_rate_limit(&alice);
        }
        assert_eq!(limiter.evict_stale(), 0);
        assert_eq!(limiter.request_count(&alice), 4);
    }

    // ─── Reset Tests ─────────────────────────────────────────────────

    #[test]
    fn reset_clears_all_windows_for_caller_only() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(1, 1_000, &clock);
        let alice = caller("alice");
        let bob = caller("bob");

        limiter.check_rate_limit(&alice);
        limiter.check_rate_limit(&bob);
        assert!(!limiter.check_rate_limit(&alice));

        limiter.reset(&alice);
        limiter.reset(&alice);
        assert!(limiter.check_rate_limit(&alice));
        assert!(!limiter.check_rate_limit(&bob));
    }

    #[test]
    fn different_callers_have_independent_limits() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = limiter(3, 1_000, &clock);

        for _ in 0..3 {
            limiter.check_rate_limit(&caller("1.1.1.1"));
        }
        assert!(!limiter.check_rate_limit(&caller("1.1.1.1")));
        assert!(limiter.check_rate_limit(&caller("2.2.2.2")));
    }

    // ─── Construction Tests ──────────────────────────────────────────

    #[test]
    fn zero_limit_or_window_is_rejected() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at(0));
        assert!(FixedWindowRateLimiter::new(0, 1_000, clock.clone()).is_err());
        assert!(FixedWindowRateLimiter::new(1, 0, clock).is_err());
    }

    #[test]
    fn concurrent_callers_never_exceed_limit() {
        let clock = Arc::new(ManualClock::at(0));
        let limiter = Arc::new(limiter(100, 60_000, &clock));
        let alice = caller("alice");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                let alice = alice.clone();
                std::thread::spawn(move || {
                    (0..50).filter(|_| limiter.check_rate_limit(&alice)).count()
                })
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 100);
        assert_eq!(limiter.request_count(&alice), 100);
    }
}
