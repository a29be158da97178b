// src/keyed_limiter.rs

// flux-bucket: one independent token bucket per client key.

// dependencies
use crate::bucket::{BucketDecision, BucketLimits, BucketState, validate_request};
use crate::clock::{Clock, MonotonicClock};
use crate::config::BucketLimiterConfig;
use crate::errors::BucketLimiterError;
use dashmap::DashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;
use tracing::debug;

/// A table of token buckets keyed by client.
/// K is the type used to identify clients (e.g., String, u64, IpAddr).
/// C is the clock type, defaulting to MonotonicClock.
///
/// Every key gets its own bucket with the same limits, created full on first use.
/// Buckets live in a `DashMap`, so keys on different shards never contend and
/// each key's refill-then-consume runs under its shard lock.
#[derive(Debug)]
pub struct KeyedBucketLimiter<K, C = MonotonicClock>
where
    K: Hash + Eq,
    C: Clock,
{
    limits: BucketLimits,
    buckets: DashMap<K, BucketState>,
    clock: C,
}

impl<K, C> KeyedBucketLimiter<K, C>
where
    K: Hash + Eq,
    C: Clock,
{
    pub fn new(capacity: u64, refill_rate: f64, clock: C) -> Result<Self, BucketLimiterError> {
        Self::with_config(BucketLimiterConfig::new(capacity, refill_rate), clock)
    }

    pub fn with_config(config: BucketLimiterConfig, clock: C) -> Result<Self, BucketLimiterError> {
        let limits = BucketLimits::from_config(&config)?;

        debug!(
            capacity = limits.capacity(),
            refill_rate = limits.refill_rate(),
            "keyed token bucket limiter created"
        );

        Ok(Self {
            limits,
            buckets: DashMap::new(),
            clock,
        })
    }

    pub fn capacity(&self) -> u64 {
        self.limits.capacity()
    }

    pub fn refill_rate(&self) -> f64 {
        self.limits.refill_rate()
    }

    pub fn allow(&self, key: K) -> bool {
        self.acquire(key, 1).allowed
    }

    pub fn allow_n(&self, key: K, tokens: u64) -> Result<bool, BucketLimiterError> {
        self.check_n(key, tokens).map(|decision| decision.allowed)
    }

    pub fn check_n(&self, key: K, tokens: u64) -> Result<BucketDecision, BucketLimiterError> {
        validate_request(tokens)?;
        Ok(self.acquire(key, tokens))
    }

    /// Tokens available to `key` right now. Unknown keys report a full bucket.
    pub fn available<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.buckets.get(key) {
            Some(bucket) => bucket.available(&self.limits, self.clock.now()),
            None => self.limits.capacity() as f64,
        }
    }

    /// Number of keys currently tracked
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drop buckets that have been idle for at least `max_idle` and have refilled to capacity.
    ///
    /// Partially drained buckets are always kept, so a sweep never hands a client extra burst.
    /// Returns the number of keys removed.
    pub fn cleanup_stale_keys(&self, max_idle: Duration) -> usize {
        let now = self.clock.now();
        let max_idle_nanos = u64::try_from(max_idle.as_nanos()).unwrap_or(u64::MAX);

        let mut removed = 0;
        self.buckets.retain(|_, bucket| {
            let stale = bucket.is_stale(&self.limits, now, max_idle_nanos);
            if stale {
                removed += 1;
            }
            !stale
        });

        debug!(removed, remaining = self.buckets.len(), "swept idle token buckets");
        removed
    }

    fn acquire(&self, key: K, tokens: u64) -> BucketDecision {
        let mut bucket = self
            .buckets
            .entry(key)
            .or_insert_with(|| BucketState::full(&self.limits, self.clock.now()));
        let now = self.clock.now();
        bucket.acquire(&self.limits, now, tokens)
    }
}
