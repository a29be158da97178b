// tests/ratelimiter/error_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use flux_bucket::{BucketLimiter, BucketLimiterConfig, BucketLimiterError, KeyedBucketLimiter};

    #[test]
    fn zero_request_is_an_invalid_argument() {
        let limiter = BucketLimiter::new(5, 1.0, TestClock::new()).unwrap();

        match limiter.allow_n(0) {
            Err(BucketLimiterError::InvalidArgument { requested }) => assert_eq!(requested, 0),
            other => panic!("Expected InvalidArgument, got: {:?}", other),
        }
        assert!(limiter.check_n(0).is_err());
    }

    #[test]
    fn invalid_argument_does_not_corrupt_later_calls() {
        let limiter = BucketLimiter::new(3, 1.0, TestClock::new()).unwrap();
        assert!(limiter.allow());

        for _ in 0..10 {
            assert!(limiter.allow_n(0).is_err());
        }

        assert_eq!(limiter.available(), 2.0);
        assert!(limiter.allow_n(2).unwrap());
        assert!(!limiter.allow());
    }

    #[test]
    fn denial_is_not_an_error() {
        let limiter = BucketLimiter::new(1, 1.0, TestClock::new()).unwrap();
        assert!(limiter.allow());

        // rate limited: a valid answer, distinct from misuse
        assert_eq!(limiter.allow_n(1), Ok(false));
    }

    #[test]
    fn keyed_invalid_argument_creates_no_bucket() {
        let limiter = KeyedBucketLimiter::new(2, 1.0, TestClock::new()).unwrap();

        assert!(matches!(
            limiter.allow_n("client1", 0),
            Err(BucketLimiterError::InvalidArgument { .. })
        ));
        assert!(limiter.is_empty());
    }

    #[test]
    fn error_display_formatting() {
        let config_error = BucketLimiterConfig::new(0, 1.0).validate().unwrap_err();
        let message = config_error.to_string();
        assert!(message.contains("capacity"), "unexpected message: {}", message);

        let rate_error = BucketLimiterConfig::new(1, -3.0).validate().unwrap_err();
        assert!(rate_error.to_string().contains("-3"));

        let argument_error = BucketLimiterError::InvalidArgument { requested: 0 };
        assert!(argument_error.to_string().contains("at least 1"));
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}

        let error = BucketLimiterError::InvalidConfig("capacity must be at least 1".to_string());
        assert_error(&error);
    }
}
