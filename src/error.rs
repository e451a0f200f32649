//! Error types
//!
//! Provides unified error handling using thiserror.

use std::fmt::{Debug, Display};

use thiserror::Error;

// == Retry Error Enum ==
/// Why a cancellable retry sequence stopped without a value.
///
/// The wrapped `error` is always the operation's own error value, untouched.
#[derive(Error, Debug)]
pub enum RetryError<E>
where
    E: Debug + Display,
{
    /// The operation failed with an error that matched no retryable marker
    #[error("non-retryable failure after {attempts} attempt(s): {error}")]
    Terminal { error: E, attempts: u32 },

    /// Every permitted attempt failed with a retryable error
    #[error("retries exhausted after {attempts} attempt(s): {error}")]
    Exhausted { error: E, attempts: u32 },

    /// The caller cancelled the sequence during an attempt or a backoff wait
    #[error("retry cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32, last_error: Option<E> },
}

impl<E: Debug + Display> RetryError<E> {
    /// Number of times the operation was invoked.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Terminal { attempts, .. }
            | Self::Exhausted { attempts, .. }
            | Self::Cancelled { attempts, .. } => *attempts,
        }
    }

    /// The last error the operation produced, if it produced one.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Terminal { error, .. } | Self::Exhausted { error, .. } => Some(error),
            Self::Cancelled { last_error, .. } => last_error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

// == Config Error Enum ==
/// Malformed configuration input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed as whole seconds
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidValue { name: &'static str, value: String },

    /// An interval variable was zero
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_error_accessors() {
        let err = RetryError::Exhausted {
            error: "ECONNRESET".to_string(),
            attempts: 4,
        };

        assert!(err.is_exhausted());
        assert!(!err.is_terminal());
        assert_eq!(err.attempts(), 4);
        assert_eq!(err.to_string(), "retries exhausted after 4 attempt(s): ECONNRESET");
        assert_eq!(err.into_inner().as_deref(), Some("ECONNRESET"));
    }

    #[test]
    fn test_cancelled_without_error() {
        let err: RetryError<String> = RetryError::Cancelled {
            attempts: 1,
            last_error: None,
        };

        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "retry cancelled after 1 attempt(s)");
        assert!(err.into_inner().is_none());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ZeroInterval("CACHE_SWEEP_INTERVAL_SECS");
        assert_eq!(
            err.to_string(),
            "CACHE_SWEEP_INTERVAL_SECS must be greater than zero"
        );
    }
}
