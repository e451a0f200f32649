//! Retry Executor Module
//!
//! Retry loop with exponential backoff and error classification.
//!
//! A sequence moves `Attempting -> Backoff -> Attempting ...` until it ends in
//! one of three ways: the operation succeeds, it fails with a non-retryable
//! error, or a retryable error survives the whole budget. Every pass through
//! the loop either returns or advances the attempt counter, so there is no
//! exit without an outcome.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt::{Debug, Display};
use std::future::{self, Future};

use tracing::{debug, info, warn};

use crate::error::RetryError;
use crate::retry::{compute_backoff, is_retryable, CancelToken, RetryPolicy};

// == Entry Points ==
/// Runs `operation` until it succeeds or the policy says to stop.
///
/// On failure the operation's own error is returned unchanged, whether it was
/// terminal or the retry budget ran out. `context` labels the log events.
///
/// # Example
/// ```ignore
/// let listings = execute(|| scraper.search(&query), &RetryPolicy::network(), "finn").await?;
/// ```
pub async fn execute<T, E, F, Fut>(operation: F, policy: &RetryPolicy, context: &str) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    run_to_completion(operation, &prepared(policy), context).await
}

/// Like [`execute`], but stops early when `cancel` fires, and reports which way
/// the sequence ended.
///
/// Cancellation is observed both while an attempt is in flight (the attempt's
/// future is dropped) and during the backoff wait.
pub async fn execute_with_cancel<T, E, F, Fut>(
    operation: F,
    policy: &RetryPolicy,
    context: &str,
    cancel: &CancelToken,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Debug + Display,
{
    run_until_cancelled(operation, &prepared(policy), context, cancel).await
}

async fn run_to_completion<T, E, F, Fut>(operation: F, policy: &RetryPolicy, context: &str) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    match run(operation, policy, context, future::pending::<Infallible>()).await {
        Ok(value) => Ok(value),
        Err(Halt::Failed { error, .. }) => Err(error),
        Err(Halt::Interrupted { reason, .. }) => match reason {},
    }
}

async fn run_until_cancelled<T, E, F, Fut>(
    operation: F,
    policy: &RetryPolicy,
    context: &str,
    cancel: &CancelToken,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Debug + Display,
{
    match run(operation, policy, context, cancel.cancelled()).await {
        Ok(value) => Ok(value),
        Err(Halt::Failed {
            outcome: Outcome::Terminal,
            error,
            attempts,
        }) => Err(RetryError::Terminal { error, attempts }),
        Err(Halt::Failed {
            outcome: Outcome::Exhausted,
            error,
            attempts,
        }) => Err(RetryError::Exhausted { error, attempts }),
        Err(Halt::Interrupted {
            attempts,
            last_error,
            reason: (),
        }) => {
            info!(context, attempts, "Retry sequence cancelled");
            Err(RetryError::Cancelled {
                attempts,
                last_error,
            })
        }
    }
}

// == Retry Executor ==
/// A retry policy bundled with the entry points that use it.
///
/// The policy is normalized once at construction, so a degenerate policy is
/// reported a single time rather than on every call.
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Creates an executor, clamping degenerate settings in `policy`.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy: policy.normalized(),
        }
    }

    /// Executor using [`RetryPolicy::network`].
    pub fn network() -> Self {
        Self::new(RetryPolicy::network())
    }

    /// The normalized policy this executor runs with.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// See [`execute`].
    pub async fn execute<T, E, F, Fut>(&self, operation: F, context: &str) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        run_to_completion(operation, &self.policy, context).await
    }

    /// See [`execute_with_cancel`].
    pub async fn execute_with_cancel<T, E, F, Fut>(
        &self,
        operation: F,
        context: &str,
        cancel: &CancelToken,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Debug + Display,
    {
        run_until_cancelled(operation, &self.policy, context, cancel).await
    }
}

// == Attempt Loop ==
/// Borrows `policy` when it is usable as-is, otherwise a normalized copy.
fn prepared(policy: &RetryPolicy) -> Cow<'_, RetryPolicy> {
    if policy.is_degenerate() {
        Cow::Owned(policy.clone().normalized())
    } else {
        Cow::Borrowed(policy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Terminal,
    Exhausted,
}

/// How `run` stopped without a value. `R` is whatever the cancel future yields.
enum Halt<E, R> {
    Failed {
        outcome: Outcome,
        error: E,
        attempts: u32,
    },
    Interrupted {
        attempts: u32,
        last_error: Option<E>,
        reason: R,
    },
}

/// Drives the attempt loop. `policy` must already be normalized.
async fn run<T, E, F, Fut, C>(
    mut operation: F,
    policy: &RetryPolicy,
    context: &str,
    cancel: C,
) -> Result<T, Halt<E, C::Output>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    C: Future,
{
    tokio::pin!(cancel);

    let mut attempt: u32 = 0;
    let mut last_error: Option<E> = None;

    loop {
        if attempt > 0 {
            let delay = compute_backoff(
                attempt - 1,
                policy.initial_delay,
                policy.max_delay,
                policy.backoff_multiplier,
            );
            info!(
                context,
                attempt,
                max_retries = policy.max_retries,
                remaining = policy.max_retries - attempt,
                delay_ms = delay.as_millis() as u64,
                "Retrying operation after backoff"
            );

            tokio::select! {
                biased;
                reason = &mut cancel => {
                    return Err(Halt::Interrupted { attempts: attempt, last_error, reason });
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }

        // Cancelled before this attempt started: the operation is never invoked
        tokio::select! {
            biased;
            reason = &mut cancel => {
                return Err(Halt::Interrupted { attempts: attempt, last_error, reason });
            }
            _ = future::ready(()) => {}
        }

        let attempts = attempt + 1;
        let result = tokio::select! {
            biased;
            reason = &mut cancel => {
                return Err(Halt::Interrupted { attempts, last_error, reason });
            }
            result = operation() => result,
        };

        let error = match result {
            Ok(value) => {
                if attempt > 0 {
                    info!(context, attempts, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        if !is_retryable(&error, Some(policy.retryable_markers.as_slice())) {
            warn!(
                context,
                attempts,
                error = %error,
                "Operation failed with non-retryable error"
            );
            return Err(Halt::Failed {
                outcome: Outcome::Terminal,
                error,
                attempts,
            });
        }

        if attempt >= policy.max_retries {
            warn!(
                context,
                attempts,
                max_retries = policy.max_retries,
                error = %error,
                "Retry budget exhausted"
            );
            return Err(Halt::Failed {
                outcome: Outcome::Exhausted,
                error,
                attempts,
            });
        }

        debug!(context, attempts, error = %error, "Attempt failed with retryable error");
        last_error = Some(error);
        attempt += 1;
    }
}
