// tests/ratelimiter/config_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use flux_bucket::{BucketLimiter, BucketLimiterConfig, BucketLimiterError, KeyedBucketLimiter};
    use std::time::Duration;

    // Config validation tests
    #[test]
    fn config_rejects_zero_capacity() {
        let config = BucketLimiterConfig::new(0, 5.0);
        let result = config.validate();
        assert!(matches!(result, Err(BucketLimiterError::InvalidConfig(_))));
    }

    #[test]
    fn config_rejects_zero_rate() {
        let config = BucketLimiterConfig::new(5, 0.0);
        let result = config.validate();
        assert!(matches!(result, Err(BucketLimiterError::InvalidConfig(_))));
    }

    #[test]
    fn config_rejects_negative_rate() {
        let config = BucketLimiterConfig::new(5, -1.0);
        assert!(matches!(
            config.validate(),
            Err(BucketLimiterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_rejects_non_finite_rate() {
        for rate in [f64::NAN, f64::INFINITY] {
            let config = BucketLimiterConfig::new(5, rate);
            assert!(
                matches!(config.validate(), Err(BucketLimiterError::InvalidConfig(_))),
                "rate {} should be rejected",
                rate
            );
        }
    }

    #[test]
    fn config_accepts_fractional_rate() {
        let config = BucketLimiterConfig::new(1, 0.25);
        assert!(config.validate().is_ok());
    }

    // Test config builder pattern
    #[test]
    fn config_builder_pattern_works() {
        let config = BucketLimiterConfig::new(0, 0.0).capacity(10).refill_rate(5.0);
        assert!(config.validate().is_ok());

        let limiter = BucketLimiter::with_config(config, TestClock::new()).unwrap();
        assert_eq!(limiter.capacity(), 10);
        assert_eq!(limiter.refill_rate(), 5.0);
    }

    #[test]
    fn per_period_sets_fractional_rate() {
        let config = BucketLimiterConfig::new(3, 1.0).per_period(1, Duration::from_secs(4));
        assert!(config.validate().is_ok());

        let limiter = BucketLimiter::with_config(config, TestClock::new()).unwrap();
        assert_eq!(limiter.refill_rate(), 0.25);
    }

    #[test]
    fn per_period_rejects_empty_refill() {
        let no_tokens = BucketLimiterConfig::new(3, 1.0).per_period(0, Duration::from_secs(1));
        assert!(matches!(
            no_tokens.validate(),
            Err(BucketLimiterError::InvalidConfig(_))
        ));

        let no_period = BucketLimiterConfig::new(3, 1.0).per_period(1, Duration::ZERO);
        assert!(matches!(
            BucketLimiter::with_config(no_period, TestClock::new()),
            Err(BucketLimiterError::InvalidConfig(_))
        ));
    }

    // Constructor tests
    #[test]
    fn constructor_rejects_zero_capacity() {
        let result = BucketLimiter::new(0, 5.0, TestClock::new());
        assert!(matches!(result, Err(BucketLimiterError::InvalidConfig(_))));
    }

    #[test]
    fn constructor_rejects_zero_rate() {
        let result = BucketLimiter::new(5, 0.0, TestClock::new());
        assert!(matches!(result, Err(BucketLimiterError::InvalidConfig(_))));
    }

    #[test]
    fn keyed_constructor_shares_validation() {
        let result = KeyedBucketLimiter::<String, _>::new(5, -2.0, TestClock::new());
        assert!(matches!(result, Err(BucketLimiterError::InvalidConfig(_))));

        let limiter = KeyedBucketLimiter::<String, _>::new(5, 2.0, TestClock::new()).unwrap();
        assert_eq!(limiter.capacity(), 5);
        assert_eq!(limiter.refill_rate(), 2.0);
    }
}
