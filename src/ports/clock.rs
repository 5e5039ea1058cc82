//! Clock port for reading the current time.
//!
//! Everything time-dependent (window alignment, token refill, session
//! expiry, audit timestamps) reads time through this port so that tests
//! can drive it deterministically.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FrozenClock(Timestamp);

    impl Clock for FrozenClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    #[test]
    fn clock_is_object_safe() {
        let clock: Box<dyn Clock> = Box::new(FrozenClock(Timestamp::from_unix_millis(42)));
        assert_eq!(clock.now().as_unix_millis(), 42);
    }
}
