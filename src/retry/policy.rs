//! Retry Policy Module
//!
//! Retry budget, backoff shape and retryable-error markers, plus the two
//! presets callers choose between.

use std::time::Duration;

use tracing::warn;

// == Public Constants ==
/// Error-message fragments that mark a failure as transient.
///
/// Network-level failures (reset, timeout, refused, DNS) and browser-automation
/// failures (protocol, navigation, closed target or session).
pub const DEFAULT_RETRYABLE_MARKERS: &[&str] = &[
    "ECONNRESET",
    "ETIMEDOUT",
    "ECONNREFUSED",
    "ENOTFOUND",
    "Navigation timeout",
    "Protocol error",
    "Target closed",
    "Session closed",
];

// == Retry Policy ==
/// How many times to retry, how long to wait between attempts, and which
/// errors are worth retrying.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts = `max_retries + 1`
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound on any computed delay
    pub max_delay: Duration,
    /// Growth factor between consecutive delays
    pub backoff_multiplier: f64,
    /// Case-insensitive substrings; an error is retryable if its message contains any
    pub retryable_markers: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            retryable_markers: default_markers(),
        }
    }
}

impl RetryPolicy {
    // == Presets ==
    /// Preset for network-bound operations: a larger budget and longer waits
    /// than [`RetryPolicy::default`].
    pub fn network() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            retryable_markers: default_markers(),
        }
    }

    // == Builders ==
    /// Sets the number of retries after the first attempt.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the cap applied to every computed delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the growth factor between consecutive delays.
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Replaces the retryable marker set.
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.retryable_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Total number of times the operation may be invoked.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    // == Normalization ==
    /// True if the multiplier is not greater than one (or not finite), or if
    /// `max_delay` is below `initial_delay`.
    pub fn is_degenerate(&self) -> bool {
        !self.has_growing_backoff() || self.max_delay < self.initial_delay
    }

    /// Clamps degenerate settings instead of rejecting them.
    ///
    /// A multiplier that is not greater than one (or is not finite) becomes
    /// 1.0, giving a constant delay. A `max_delay` below `initial_delay` is
    /// raised to `initial_delay`. Each clamp is logged as a warning.
    pub fn normalized(mut self) -> Self {
        if !self.has_growing_backoff() {
            warn!(
                multiplier = self.backoff_multiplier,
                "Backoff multiplier must be greater than 1, using 1.0"
            );
            self.backoff_multiplier = 1.0;
        }
        if self.max_delay < self.initial_delay {
            warn!(
                initial_delay_ms = self.initial_delay.as_millis() as u64,
                max_delay_ms = self.max_delay.as_millis() as u64,
                "Max delay below initial delay, raising it"
            );
            self.max_delay = self.initial_delay;
        }
        self
    }

    fn has_growing_backoff(&self) -> bool {
        self.backoff_multiplier.is_finite() && self.backoff_multiplier > 1.0
    }
}

fn default_markers() -> Vec<String> {
    DEFAULT_RETRYABLE_MARKERS
        .iter()
        .map(|marker| marker.to_string())
        .collect()
}
