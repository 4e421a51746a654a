//! Runtime configuration for the transmission driver.

use std::time::Duration;

/// Configures a [`crate::driver::Driver`]: the pacing interval between
/// sends, and an optional cap on the number of candidates sent, for
/// bounded test runs. Constructed directly rather than read from the
/// environment or a config file — the driver has no persisted state.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    interval: Duration,
    max_candidates: Option<u64>,
}

impl DriverConfig {
    /// Default configuration: 100ms between sends, unbounded candidate
    /// count.
    #[must_use]
    pub fn new() -> Self {
        Self { interval: Duration::from_millis(100), max_candidates: None }
    }

    /// Set the pacing interval between sends.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Cap the number of candidates sent before the run terminates, for
    /// bounded test runs. `None` (the default) means unbounded.
    #[must_use]
    pub fn max_candidates(mut self, max: u64) -> Self {
        self.max_candidates = Some(max);
        self
    }

    pub(crate) fn interval_duration(&self) -> Duration {
        self.interval
    }

    pub(crate) fn candidate_limit(&self) -> Option<u64> {
        self.max_candidates
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}
