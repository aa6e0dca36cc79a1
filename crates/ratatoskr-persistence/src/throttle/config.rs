//! Throttle configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for rate-limited writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Minimum time between two accepted writes, in milliseconds.
    ///
    /// The first attempt in each window is accepted; later attempts in the
    /// same window are dropped.
    pub interval_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { interval_ms: 100 }
    }
}

impl ThrottleConfig {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
