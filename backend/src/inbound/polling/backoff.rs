//! Delay schedule after failed polls.

use std::time::Duration;

/// Exponential delay between consecutive poll failures, capped at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBackoff {
    /// Delay after the first failure.
    pub base: Duration,
    /// Upper bound for any delay.
    pub max: Duration,
}

impl Default for PollBackoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            max: Duration::from_secs(30),
        }
    }
}

impl PollBackoff {
    /// Delay to wait after `consecutive_failures` failures in a row.
    pub fn delay(&self, consecutive_failures: u32) -> Duration {
        let exponent = consecutive_failures.saturating_sub(1).min(16);
        self.base
            .saturating_mul(1_u32 << exponent)
            .min(self.max)
    }
}
