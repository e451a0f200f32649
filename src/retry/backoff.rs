//! Backoff Module
//!
//! Exponential delay between retry attempts, capped at the policy maximum.

use std::time::Duration;

// == Compute Backoff ==
/// Delay before retry number `attempt_index + 1`:
/// `min(initial_delay * multiplier^attempt_index, max_delay)`.
///
/// `attempt_index` is zero-based and counts retries, so the wait before the
/// first retry uses index 0. Results that overflow or are not finite clamp to
/// `max_delay`.
pub fn compute_backoff(
    attempt_index: u32,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
) -> Duration {
    let nanos = initial_delay.as_nanos() as f64 * multiplier.powf(f64::from(attempt_index));

    if !nanos.is_finite() || nanos >= max_delay.as_nanos() as f64 {
        return max_delay;
    }

    if nanos < u64::MAX as f64 {
        // Float-to-int `as` saturates, so negative products land on zero
        return Duration::from_nanos(nanos.round() as u64).min(max_delay);
    }

    // Past ~584 years in nanoseconds; go through seconds to keep the magnitude
    Duration::try_from_secs_f64(nanos / 1e9)
        .unwrap_or(max_delay)
        .min(max_delay)
}

// == Unit Tests ==
