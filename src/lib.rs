// src/lib.rs

//! # Flux Bucket
//!
//! A concurrency-safe rate limiter based on the token bucket algorithm.
//!
//! A bucket holds up to `capacity` tokens and refills continuously at
//! `refill_rate` tokens per second. Each admitted operation consumes tokens;
//! when there are not enough, the call is denied immediately. Callers are
//! never queued. New buckets start full.
//!
//! ## Quick Example
//!
//! ```rust
//! use flux_bucket::{BucketLimiter, MonotonicClock};
//!
//! let limiter = BucketLimiter::new(10, 5.0, MonotonicClock::new()).unwrap();
//!
//! if limiter.allow() {
//!     println!("Request allowed");
//! }
//!
//! let decision = limiter.check_n(3).unwrap();
//! if !decision.allowed {
//!     println!("Rate limited - retry after {:?}", decision.retry_after);
//! }
//! ```
//!
//! Use [`KeyedBucketLimiter`] for one bucket per client key.

// private modules
mod bucket;
mod bucket_limiter;
mod clock;
mod config;
mod errors;
mod keyed_limiter;

// public API exports
pub use bucket::BucketDecision;
pub use bucket_limiter::BucketLimiter;
#[cfg(feature = "testing")]
pub use clock::ManualClock;
pub use clock::{Clock, MonotonicClock};
pub use config::BucketLimiterConfig;
pub use errors::BucketLimiterError;
pub use keyed_limiter::KeyedBucketLimiter;
