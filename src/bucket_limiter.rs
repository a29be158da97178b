// src/bucket_limiter.rs

// flux-bucket: a single token bucket guarded by one exclusive lock.

// dependencies
use crate::bucket::{BucketDecision, BucketLimits, BucketState, validate_request};
use crate::clock::{Clock, MonotonicClock};
use crate::config::BucketLimiterConfig;
use crate::errors::BucketLimiterError;
use parking_lot::Mutex;
use tracing::debug;

/// A token bucket rate limiter.
/// C is the clock type, defaulting to MonotonicClock.
///
/// The bucket starts full, so a new limiter can absorb a burst of `capacity`
/// requests immediately. Refill is lazy: each call credits the time elapsed
/// since the previous call, then tries to consume, all under one lock.
///
/// To share a limiter process-wide, build it once and hand out an `Arc`.
#[derive(Debug)]
pub struct BucketLimiter<C = MonotonicClock>
where
    C: Clock,
{
    limits: BucketLimits,
    state: Mutex<BucketState>,
    clock: C,
}

impl<C> BucketLimiter<C>
where
    C: Clock,
{
    /// Create a limiter holding at most `capacity` tokens, refilled at `refill_rate` tokens per second.
    ///
    /// Fails with [`BucketLimiterError::InvalidConfig`] if either parameter is not positive.
    pub fn new(capacity: u64, refill_rate: f64, clock: C) -> Result<Self, BucketLimiterError> {
        Self::with_config(BucketLimiterConfig::new(capacity, refill_rate), clock)
    }

    // method to create a new limiter from a config object
    pub fn with_config(config: BucketLimiterConfig, clock: C) -> Result<Self, BucketLimiterError> {
        let limits = BucketLimits::from_config(&config)?;
        let state = BucketState::full(&limits, clock.now());

        debug!(
            capacity = limits.capacity(),
            refill_rate = limits.refill_rate(),
            "token bucket limiter created"
        );

        Ok(Self {
            limits,
            state: Mutex::new(state),
            clock,
        })
    }

    pub fn capacity(&self) -> u64 {
        self.limits.capacity()
    }

    pub fn refill_rate(&self) -> f64 {
        self.limits.refill_rate()
    }

    /// Try to take a single token.
    pub fn allow(&self) -> bool {
        self.acquire(1).allowed
    }

    /// Try to take `tokens` tokens at once; either all are taken or none are.
    ///
    /// Requests larger than the capacity are always denied.
    pub fn allow_n(&self, tokens: u64) -> Result<bool, BucketLimiterError> {
        self.check_n(tokens).map(|decision| decision.allowed)
    }

    /// Same as [`allow_n`](Self::allow_n), returning the decision with its metadata.
    pub fn check_n(&self, tokens: u64) -> Result<BucketDecision, BucketLimiterError> {
        validate_request(tokens)?;
        Ok(self.acquire(tokens))
    }

    /// Tokens available right now, without consuming any.
    pub fn available(&self) -> f64 {
        let state = self.state.lock();
        state.available(&self.limits, self.clock.now())
    }

    fn acquire(&self, tokens: u64) -> BucketDecision {
        let mut state = self.state.lock();
        let now = self.clock.now();
        state.acquire(&self.limits, now, tokens)
    }
}
