//! Classify Module
//!
//! Decides whether a failure is transient by matching its message against
//! the retryable markers.

use std::fmt::Display;

use crate::retry::DEFAULT_RETRYABLE_MARKERS;

// == Classification ==
/// Whether `error`'s message contains any of `markers`, ignoring case.
///
/// `None` falls back to [`DEFAULT_RETRYABLE_MARKERS`]. Any `Display` value can
/// be classified, so plain strings work as well as error types.
pub fn is_retryable<E>(error: &E, markers: Option<&[String]>) -> bool
where
    E: Display + ?Sized,
{
    let message = error.to_string();
    match markers {
        Some(markers) => message_matches(&message, markers),
        None => message_matches(&message, DEFAULT_RETRYABLE_MARKERS),
    }
}

/// Case-insensitive substring match of `message` against `markers`.
pub fn message_matches<S: AsRef<str>>(message: &str, markers: &[S]) -> bool {
    let message = message.to_lowercase();
    markers
        .iter()
        .any(|marker| message.contains(&marker.as_ref().to_lowercase()))
}
