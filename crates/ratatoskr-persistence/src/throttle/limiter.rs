//! Leading-edge rate limiter.

use std::time::Duration;

use super::ThrottleConfig;

/// Admits at most one attempt per interval.
///
/// Time is passed in by the caller as a monotonic offset (for example
/// `performance.now()` in a browser), which keeps the limiter a plain value
/// that can be driven deterministically. The first attempt is always
/// admitted.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    last_admitted: Option<Duration>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_admitted: None,
        }
    }

    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self::new(config.interval())
    }

    /// Returns `true` when the caller may act now.
    pub fn attempt(&mut self, now: Duration) -> bool {
        let allowed = match self.last_admitted {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        };
        if allowed {
            self.last_admitted = Some(now);
        }
        allowed
    }

    /// Forget the last admission; the next attempt is admitted.
    ///
    /// Called after an out-of-band write so the window restarts.
    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_first_attempt_is_admitted() {
        let mut limiter = RateLimiter::new(ms(100));
        assert!(limiter.attempt(ms(0)));
        assert!(!limiter.attempt(ms(0)));
    }

    #[test]
    fn test_trailing_attempts_in_window_are_dropped() {
        let mut limiter = RateLimiter::new(ms(100));
        assert!(limiter.attempt(ms(1000)));
        assert!(!limiter.attempt(ms(1010)));
        assert!(!limiter.attempt(ms(1099)));
        assert!(limiter.attempt(ms(1100)));
        assert!(!limiter.attempt(ms(1150)));
    }

    #[test]
    fn test_window_starts_at_admitted_attempt() {
        let mut limiter = RateLimiter::new(ms(100));
        assert!(limiter.attempt(ms(0)));
        assert!(!limiter.attempt(ms(90)));
        // Dropped attempts do not move the window.
        assert!(limiter.attempt(ms(100)));
    }

    #[test]
    fn test_reset() {
        let mut limiter = RateLimiter::new(ms(100));
        assert!(limiter.attempt(ms(5)));
        limiter.reset();
        assert!(limiter.attempt(ms(6)));
    }

    #[test]
    fn test_zero_interval_admits_everything() {
        let mut limiter = RateLimiter::new(Duration::ZERO);
        assert!((0..5).all(|t| limiter.attempt(ms(t))));
    }
}
