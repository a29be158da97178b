// src/config.rs

//! Configuration types for the bucket limiters

// dependencies
use crate::errors::BucketLimiterError;
use std::time::Duration;

/// Float rates are resolved to nano-token precision: `rate` tokens per second
/// becomes `round(rate * 1e9)` tokens every 1e9 seconds.
const RATE_SCALE: f64 = 1_000_000_000.0;
const RATE_PERIOD_NANOS: u64 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Refill {
    PerSecond(f64),
    PerPeriod { tokens: u64, period: Duration },
}

/// Configuration for token bucket behavior
#[derive(Debug, Clone, PartialEq)]
pub struct BucketLimiterConfig {
    pub(crate) capacity: u64,
    pub(crate) refill: Refill,
}

impl BucketLimiterConfig {
    /// Create a new configuration from a burst capacity and a refill rate in tokens per second
    pub fn new(capacity: u64, refill_rate: f64) -> Self {
        Self {
            capacity,
            refill: Refill::PerSecond(refill_rate),
        }
    }

    /// Builder-style: set burst capacity
    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style: set refill rate in tokens per second
    pub fn refill_rate(mut self, refill_rate: f64) -> Self {
        self.refill = Refill::PerSecond(refill_rate);
        self
    }

    /// Builder-style: refill exactly `tokens` every `period`.
    ///
    /// Unlike a float rate this is exact for any rational rate:
    /// `per_period(1, Duration::from_secs(7))` credits one whole token after seven seconds.
    pub fn per_period(mut self, tokens: u64, period: Duration) -> Self {
        self.refill = Refill::PerPeriod { tokens, period };
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), BucketLimiterError> {
        if self.capacity == 0 {
            return Err(BucketLimiterError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        self.refill_fraction().map(|_| ())
    }

    /// The refill rate as `(tokens, period_nanos)` in lowest terms.
    pub(crate) fn refill_fraction(&self) -> Result<(u64, u64), BucketLimiterError> {
        match self.refill {
            Refill::PerSecond(rate) => {
                if !rate.is_finite() || rate <= 0.0 {
                    return Err(BucketLimiterError::InvalidConfig(format!(
                        "refill rate must be positive and finite, got {}",
                        rate
                    )));
                }
                let scaled = (rate * RATE_SCALE).round();
                if scaled < 1.0 || scaled >= u64::MAX as f64 {
                    return Err(BucketLimiterError::InvalidConfig(format!(
                        "refill rate {} is outside the supported range",
                        rate
                    )));
                }
                Ok(reduce(scaled as u64, RATE_PERIOD_NANOS))
            }
            Refill::PerPeriod { tokens, period } => {
                if tokens == 0 {
                    return Err(BucketLimiterError::InvalidConfig(
                        "refill tokens per period must be at least 1".to_string(),
                    ));
                }
                let period_nanos = u64::try_from(period.as_nanos()).unwrap_or(u64::MAX);
                if period_nanos == 0 {
                    return Err(BucketLimiterError::InvalidConfig(
                        "refill period must be longer than zero".to_string(),
                    ));
                }
                Ok(reduce(tokens, period_nanos))
            }
        }
    }
}

fn reduce(tokens: u64, period_nanos: u64) -> (u64, u64) {
    let divisor = gcd(tokens, period_nanos);
    (tokens / divisor, period_nanos / divisor)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
