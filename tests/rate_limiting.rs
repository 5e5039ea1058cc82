//! Integration tests for the rate limiting strategies.
//!
//! These tests drive both limiters through the public `RateLimiter` port
//! with a manual clock:
//! 1. Admission sequences at exact instants
//! 2. Reset behaviour
//! 3. Stale entry eviction
//! 4. Concurrent admission against one caller

use std::sync::Arc;
use std::thread;

use pressroom::adapters::{
    EvictionSweeper, FixedWindowRateLimiter, ManualClock, RateLimiterStrategy,
    TokenBucketRateLimiter,
};
use pressroom::config::RateLimitConfig;
use pressroom::ports::{CallerId, Clock, RateLimitStrategy, RateLimiter};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn caller(id: &str) -> CallerId {
    CallerId::new(id).expect("caller id")
}

fn strategy(config: RateLimitConfig, clock: &Arc<ManualClock>) -> RateLimiterStrategy {
    let clock: Arc<dyn Clock> = clock.clone();
    RateLimiterStrategy::from_config(&config, clock).expect("valid config")
}

// =============================================================================
// Token Bucket
// =============================================================================

#[test]
fn token_bucket_capacity_two_sequence() {
    let clock = Arc::new(ManualClock::at(0));
    let limiter = strategy(RateLimitConfig::token_bucket(2, 1_000), &clock);
    let user = caller("user-1");

    let observed: Vec<(bool, u32)> = (0..3)
        .map(|_| {
            let d = limiter.admit(&user);
            (d.allowed, d.remaining)
        })
        .collect();
    assert_eq!(observed, vec![(true, 1), (true, 0), (false, 0)]);

    clock.set(1_000);
    let refilled = limiter.admit(&user);
    assert!(refilled.allowed);
    assert_eq!(refilled.remaining, 1);
}

#[test]
fn token_bucket_idle_for_ten_windows_caps_at_capacity() {
    let clock = Arc::new(ManualClock::at(0));
    let limiter = strategy(RateLimitConfig::token_bucket(100, 60_000), &clock);
    let user = caller("user-1");

    limiter.admit(&user);
    clock.advance(600_000);

    let decision = limiter.admit(&user);
    assert_eq!(decision.remaining, 99);
    assert_eq!(decision.limit, 100);
}

#[test]
fn token_bucket_reset_matches_unseen_caller() {
    let clock = Arc::new(ManualClock::at(0));
    let limiter = strategy(RateLimitConfig::token_bucket(5, 1_000), &clock);
    let used = caller("used");
    let fresh = caller("fresh");

    for _ in 0..5 {
        limiter.admit(&used);
    }
    limiter.reset(&used);

    assert_eq!(limiter.admit(&used), limiter.admit(&fresh));
}

// =============================================================================
// Fixed Window
// =============================================================================

#[test]
fn fixed_window_fifty_per_minute() {
    let clock = Arc::new(ManualClock::at(0));
    let limiter = strategy(RateLimitConfig::fixed_window(50, 60_000), &clock);
    let user = caller("user-1");

    let allowed = (0..50).filter(|_| limiter.admit(&user).allowed).count();
    assert_eq!(allowed, 50);

    let denied = limiter.admit(&user);
    assert!(!denied.allowed);
    assert_eq!(denied.reset_at.as_unix_millis(), 60_000);

    clock.set(60_001);
    let next_window = limiter.admit(&user);
    assert!(next_window.allowed);
    assert_eq!(next_window.remaining, 49);
}

#[test]
fn fixed_window_reset_allows_immediately() {
    let clock = Arc::new(ManualClock::at(0));
    let limiter = strategy(RateLimitConfig::fixed_window(1, 60_000), &clock);
    let user = caller("user-1");

    assert!(limiter.admit(&user).allowed);
    assert!(!limiter.admit(&user).allowed);

    limiter.reset(&user);
    assert!(limiter.admit(&user).allowed);
}

#[test]
fn fixed_window_inline_eviction_preserves_current_counts() {
    let clock = Arc::new(ManualClock::at(0));
    let limiter =
        FixedWindowRateLimiter::new(10, 1_000, clock.clone()).expect("valid limiter");

    for n in 0..20 {
        limiter.check_rate_limit(&caller(&format!("old-{}", n)));
    }
    assert_eq!(limiter.tracked_entries(), 20);

    clock.set(5_000);
    let current = caller("current");
    for _ in 0..3 {
        limiter.check_rate_limit(&current);
    }

    assert_eq!(limiter.tracked_entries(), 1);
    assert_eq!(limiter.request_count(&current), 3);
}

#[tokio::test]
async fn fixed_window_background_sweep_matches_inline_result() {
    let clock = Arc::new(ManualClock::at(0));
    let config = RateLimitConfig::fixed_window(10, 1_000).with_background_eviction(1_000);
    let limiter = Arc::new(strategy(config, &clock));

    limiter.admit(&caller("old"));
    clock.set(5_000);
    limiter.admit(&caller("current"));

    let sweeper = EvictionSweeper::new(limiter.clone(), std::time::Duration::from_secs(1));
    assert_eq!(sweeper.sweep_once(), 1);

    let decision = limiter.admit(&caller("current"));
    assert_eq!(decision.remaining, 8);
}

// =============================================================================
// Shared Contract
// =============================================================================

#[test]
fn both_strategies_report_their_kind() {
    let clock = Arc::new(ManualClock::at(0));
    assert_eq!(
        strategy(RateLimitConfig::fixed_window(1, 1_000), &clock).strategy(),
        RateLimitStrategy::FixedWindow
    );
    assert_eq!(
        strategy(RateLimitConfig::token_bucket(1, 1_000), &clock).strategy(),
        RateLimitStrategy::TokenBucket
    );
}

#[test]
fn concurrent_admission_never_overshoots_either_strategy() {
    for config in [
        RateLimitConfig::fixed_window(40, 60_000),
        RateLimitConfig::token_bucket(40, 60_000),
    ] {
        let clock = Arc::new(ManualClock::at(0));
        let limiter: Arc<dyn RateLimiter> = Arc::new(strategy(config, &clock));
        let user = caller("shared");

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                let user = user.clone();
                thread::spawn(move || (0..10).filter(|_| limiter.admit(&user).allowed).count())
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 40);
    }
}

#[test]
fn token_bucket_is_usable_standalone() {
    let clock = Arc::new(ManualClock::at(0));
    let limiter = TokenBucketRateLimiter::new(3, 3_000, clock.clone()).expect("valid limiter");
    let user = caller("solo");

    for _ in 0..3 {
        assert!(limiter.check_rate_limit(&user).allowed);
    }
    assert!(!limiter.check_rate_limit(&user).allowed);

    clock.advance(1_000);
    assert!(limiter.check_rate_limit(&user).allowed);
    assert_eq!(limiter.tokens(&user), Some(0));

    limiter.reset_rate_limit(&user);
    assert_eq!(limiter.tokens(&user), None);
}
