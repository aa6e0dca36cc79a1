//! Rate limiting for high-frequency writes.
//!
//! Provides:
//! - `RateLimiter` - leading-edge limiter driven by caller-supplied time
//! - `ThrottleConfig` - interval settings

mod config;
mod limiter;

pub use config::ThrottleConfig;
pub use limiter::RateLimiter;
