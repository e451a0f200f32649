//! Retry Module
//!
//! Wraps flaky asynchronous operations in retries with exponential backoff.
//! Failures are classified by matching their message against a marker list:
//! transient ones are retried until the budget runs out, anything else is
//! returned to the caller on first sight.

mod backoff;
mod cancel;
mod classify;
mod executor;
mod policy;

pub use backoff::compute_backoff;
pub use cancel::CancelToken;
pub use classify::{is_retryable, message_matches};
pub use executor::{execute, execute_with_cancel, RetryExecutor};
pub use policy::{RetryPolicy, DEFAULT_RETRYABLE_MARKERS};
