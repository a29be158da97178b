// src/clock.rs

// clock trait and implementations

// dependencies
use std::sync::Arc;
use std::time::Instant;

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns a monotonic timestamp in nanoseconds as a u64.
/// Only differences between timestamps are meaningful; the origin is up to the implementor.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// MonotonicClock backed by `std::time::Instant`.
/// Reports nanoseconds elapsed since the clock was created, so it never goes backward.
/// This is the default clock used by the limiters.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        // u64 nanoseconds covers ~584 years of uptime
        self.origin.elapsed().as_nanos() as u64
    }
}

#[cfg(any(test, feature = "testing"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "testing"))]
mod manual {
    use super::Clock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    /// A clock that only moves when told to.
    ///
    /// Clones share the same underlying time, so a test can hand one clone to a
    /// limiter and keep another to drive it.
    #[derive(Debug, Clone, Default)]
    pub struct ManualClock {
        nanos: Arc<AtomicU64>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self::default()
        }

        /// Move time forward by `by`.
        pub fn advance(&self, by: Duration) {
            self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
        }

        /// Jump to an absolute offset from the clock's origin.
        ///
        /// Setting an earlier time is allowed so callers can exercise how a
        /// limiter copes with a misbehaving clock.
        pub fn set(&self, at: Duration) {
            self.nanos.store(at.as_nanos() as u64, Ordering::SeqCst);
        }

        pub fn elapsed(&self) -> Duration {
            Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> u64 {
            self.nanos.load(Ordering::SeqCst)
        }
    }
}
