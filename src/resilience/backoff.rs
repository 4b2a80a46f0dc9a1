//! Additive backoff with a ceiling.
//!
//! ```text
//! first failure       → start
//! subsequent failures → min(previous + increase, max)
//! ```
//!
//! The next interval is derived only from the previous one, so a chain
//! that reaches `max` stays there for as long as it keeps failing.

use std::time::Duration;

use crate::config::BackoffConfig;

/// Delay before the first retry, in milliseconds.
pub const START_INTERVAL_MS: u64 = 1000;

/// Amount added to the delay on every further failure, in milliseconds.
pub const INTERVAL_INCREASE_MS: u64 = 1000;

/// Upper bound for the delay, in milliseconds.
pub const MAX_INTERVAL_MS: u64 = 5000;

/// Retry interval policy for a single chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay after the first failure (also the floor).
    pub start: Duration,
    /// Growth per failure.
    pub increase: Duration,
    /// Ceiling.
    pub max: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            start: Duration::from_millis(START_INTERVAL_MS),
            increase: Duration::from_millis(INTERVAL_INCREASE_MS),
            max: Duration::from_millis(MAX_INTERVAL_MS),
        }
    }
}

impl From<&BackoffConfig> for BackoffPolicy {
    fn from(config: &BackoffConfig) -> Self {
        Self {
            start: Duration::from_millis(config.start_interval_ms),
            increase: Duration::from_millis(config.interval_increase_ms),
            max: Duration::from_millis(config.max_interval_ms),
        }
    }
}

impl BackoffPolicy {
    /// Compute the interval to wait after a failed probe.
    ///
    /// `previous` is `None` for the first failure of a chain. A `max`
    /// below `start` is treated as `start`, so intervals never shrink.
    pub fn next_interval(&self, previous: Option<Duration>) -> Duration {
        match previous {
            None => self.start,
            Some(previous) => previous
                .saturating_add(self.increase)
                .min(self.ceiling()),
        }
    }

    /// Effective upper bound, never below `start`.
    pub fn ceiling(&self) -> Duration {
        self.max.max(self.start)
    }
}

/// Render an interval in seconds the way the retry log line expects
/// (`1`, `1.5`, `5`), without trailing zeros.
pub fn format_secs(interval: Duration) -> String {
    let millis = interval.as_millis();
    if millis % 1000 == 0 {
        return format!("{}", millis / 1000);
    }
    format!("{}", millis as f64 / 1000.0)
}
