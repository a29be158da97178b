// src/errors.rs

// error handling for the bucket limiters

// dependencies
use thiserror::Error;

/// Error type for limiter misuse.
///
/// Being rate limited is not an error: a denied request is reported as
/// `Ok(false)` (or a decision with `allowed == false`). These variants only
/// cover invalid configuration and invalid call arguments.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BucketLimiterError {
    /// Raised at construction; no limiter is produced.
    #[error("invalid limiter configuration: {0}")]
    InvalidConfig(String),
    /// Raised per call for a zero-sized request; bucket state is left untouched.
    #[error("invalid argument: requested {requested} tokens, must be at least 1")]
    InvalidArgument { requested: u64 },
}
