// src/bucket.rs

// token bucket state and the refill-then-consume algorithm

// dependencies
use crate::config::BucketLimiterConfig;
use crate::errors::BucketLimiterError;
use std::time::Duration;

/// Validated, immutable bucket parameters.
///
/// The rate is the exact fraction `refill_tokens / period_nanos`. Balances are
/// kept in units of `1 / period_nanos` tokens, so one nanosecond of elapsed time
/// adds exactly `refill_tokens` units and no rounding ever happens.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BucketLimits {
    capacity: u64,
    refill_tokens: u64,
    period_nanos: u64,
    ceiling: u128,
}

impl BucketLimits {
    pub(crate) fn from_config(config: &BucketLimiterConfig) -> Result<Self, BucketLimiterError> {
        config.validate()?;
        let (refill_tokens, period_nanos) = config.refill_fraction()?;
        Ok(Self {
            capacity: config.capacity,
            refill_tokens,
            period_nanos,
            ceiling: config.capacity as u128 * period_nanos as u128,
        })
    }

    pub(crate) fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Refill rate in tokens per second.
    pub(crate) fn refill_rate(&self) -> f64 {
        self.refill_tokens as f64 * 1_000_000_000.0 / self.period_nanos as f64
    }

    fn units(&self, tokens: u64) -> u128 {
        tokens as u128 * self.period_nanos as u128
    }

    fn to_tokens(&self, units: u128) -> f64 {
        units as f64 / self.period_nanos as f64
    }
}

/// Rejects zero-sized requests before any bucket state is touched.
pub(crate) fn validate_request(tokens: u64) -> Result<(), BucketLimiterError> {
    if tokens == 0 {
        return Err(BucketLimiterError::InvalidArgument { requested: tokens });
    }
    Ok(())
}

/// Mutable counters of a single bucket.
///
/// Invariants: `units <= limits.ceiling` and `last_refill` never decreases.
#[derive(Debug, Clone)]
pub(crate) struct BucketState {
    units: u128,
    last_refill: u64,
}

impl BucketState {
    /// New buckets start full so a fresh client can burst immediately.
    pub(crate) fn full(limits: &BucketLimits, now: u64) -> Self {
        Self {
            units: limits.ceiling,
            last_refill: now,
        }
    }

    /// Balance the bucket would hold at `now`, without mutating it.
    fn projected_units(&self, limits: &BucketLimits, now: u64) -> u128 {
        let elapsed = now.saturating_sub(self.last_refill) as u128;
        self.units
            .saturating_add(elapsed * limits.refill_tokens as u128)
            .min(limits.ceiling)
    }

    fn refill(&mut self, limits: &BucketLimits, now: u64) {
        self.units = self.projected_units(limits, now);
        // advance on every call, even when less than a whole token was credited
        self.last_refill = self.last_refill.max(now);
    }

    /// Refill for the time elapsed up to `now`, then take `tokens` if they are all there.
    ///
    /// Callers must hold exclusive access to the state for the whole call.
    pub(crate) fn acquire(
        &mut self,
        limits: &BucketLimits,
        now: u64,
        tokens: u64,
    ) -> BucketDecision {
        self.refill(limits, now);

        if tokens > limits.capacity {
            return BucketDecision {
                allowed: false,
                remaining: limits.to_tokens(self.units),
                retry_after: None,
            };
        }

        let cost = limits.units(tokens);
        if self.units >= cost {
            self.units -= cost;
            BucketDecision {
                allowed: true,
                remaining: limits.to_tokens(self.units),
                retry_after: None,
            }
        } else {
            let deficit = cost - self.units;
            let wait_nanos = deficit.div_ceil(limits.refill_tokens as u128);
            BucketDecision {
                allowed: false,
                remaining: limits.to_tokens(self.units),
                retry_after: Some(Duration::from_nanos(
                    u64::try_from(wait_nanos).unwrap_or(u64::MAX),
                )),
            }
        }
    }

    /// Balance in whole-token units at `now`, capped at capacity.
    pub(crate) fn available(&self, limits: &BucketLimits, now: u64) -> f64 {
        limits.to_tokens(self.projected_units(limits, now))
    }

    /// A bucket can be dropped once it has been idle for `max_idle` and has
    /// refilled to capacity, since a recreated bucket starts full anyway.
    pub(crate) fn is_stale(&self, limits: &BucketLimits, now: u64, max_idle: u64) -> bool {
        now.saturating_sub(self.last_refill) >= max_idle
            && self.projected_units(limits, now) >= limits.ceiling
    }
}

/// Result of a rate limiting decision with metadata for callers that need more than a bool
#[derive(Debug, Clone, PartialEq)]
pub struct BucketDecision {
    /// Whether the request was admitted
    pub allowed: bool,
    /// Tokens left in the bucket after this decision
    pub remaining: f64,
    /// How long until the requested tokens will be available.
    /// `None` when allowed, or when the request exceeds capacity and can never succeed.
    pub retry_after: Option<Duration>,
}
