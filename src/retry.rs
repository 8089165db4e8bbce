/// Retry policy for remote operations
///
/// Classifies failures as retryable or terminal and runs a bounded
/// exponential-backoff loop around a fallible operation. Business-rule
/// rejections (insufficient credits, payment required) are never retried;
/// unknown errors fail closed.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::RemoteError;

/// Cooperative cancellation token.
///
/// Long-running operations poll the token between units of work; nothing is
/// forcibly aborted. Cloning shares the underlying flag, so a token handed to
/// a worker observes `cancel()` calls made by the owner.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, un-cancelled token
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Whether a failed operation is worth retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Transient failure, may succeed after backoff
    Retryable,

    /// Retrying cannot help (client error, business-rule rejection, unknown)
    Terminal,
}

/// Retry knobs for `with_retry`
#[derive(Debug, Clone)]
pub struct RetryOptions {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,

    /// Delay before the first retry; doubles on every subsequent retry
    pub base_delay: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(2000),
        }
    }
}

/// Message substrings that mark an otherwise unclassified failure as
/// transient. Covers browser-level fetch failures, gateway errors and the
/// backend's edge-function wrapper.
const TRANSIENT_MARKERS: &[&str] = &[
    "failed to fetch",
    "network",
    "timeout",
    "timed out",
    "connection reset",
    "connection refused",
    "abort",
    "edge function",
    "500",
    "502",
    "503",
    "504",
];

fn message_is_transient(message: &str) -> bool {
    let lower = message.to_lowercase();
    TRANSIENT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Classify a remote failure.
///
/// Rules, in priority order:
/// 1. Network-level fetch failure is retryable.
/// 2. HTTP 4xx is terminal, except 429 which is retryable.
/// 3. Insufficient credits / payment required are terminal regardless of
///    message content.
/// 4. A rate-limited domain code is retryable.
/// 5. HTTP 5xx and transient message markers are retryable.
/// 6. Everything else is terminal (fail closed).
pub fn classify(error: &RemoteError) -> RetryClass {
    match error {
        RemoteError::Network(_) => RetryClass::Retryable,
        RemoteError::Http { status, .. } => match status {
            429 => RetryClass::Retryable,
            400..=499 => RetryClass::Terminal,
            500..=599 => RetryClass::Retryable,
            _ => RetryClass::Terminal,
        },
        RemoteError::InsufficientCredits { .. } | RemoteError::PaymentRequired => {
            RetryClass::Terminal
        }
        RemoteError::RateLimited => RetryClass::Retryable,
        RemoteError::Cancelled => RetryClass::Terminal,
        RemoteError::Other(message) => {
            if message_is_transient(message) {
                RetryClass::Retryable
            } else {
                RetryClass::Terminal
            }
        }
    }
}

/// Run `operation` with bounded exponential backoff.
///
/// Total attempts made = `max_retries + 1`. Terminal failures and
/// exhaustion return the most recent error; a final failure is never
/// swallowed.
pub fn with_retry<T, F>(options: &RetryOptions, operation: F) -> Result<T, RemoteError>
where
    F: FnMut() -> Result<T, RemoteError>,
{
    with_retry_observed(options, None, |_, _| {}, operation)
}

/// `with_retry` with a cancellation token and a per-retry observer.
///
/// `on_retry(retry_number, error)` runs before each backoff wait, with the
/// 1-based number of the upcoming retry. A cancelled token is observed
/// between attempts and stops the loop with `RemoteError::Cancelled`.
pub fn with_retry_observed<T, F, O>(
    options: &RetryOptions,
    token: Option<&CancellationToken>,
    mut on_retry: O,
    mut operation: F,
) -> Result<T, RemoteError>
where
    F: FnMut() -> Result<T, RemoteError>,
    O: FnMut(u32, &RemoteError),
{
    let mut attempt = 0u32;

    loop {
        if let Some(token) = token {
            if token.is_cancelled() {
                return Err(RemoteError::Cancelled);
            }
        }

        match operation() {
            Ok(value) => {
                if attempt > 0 {
                    log::debug!("[retry] succeeded after {} retries", attempt);
                }
                return Ok(value);
            }
            Err(error) => {
                if attempt >= options.max_retries || classify(&error) == RetryClass::Terminal {
                    return Err(error);
                }

                on_retry(attempt + 1, &error);

                // Cap the exponent; a window beyond 2^16 * base is not practical
                let delay = options.base_delay * 2u32.pow(attempt.min(16));
                log::debug!(
                    "[retry] attempt {} failed ({}), retrying in {}ms",
                    attempt + 1,
                    error,
                    delay.as_millis()
                );
                thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}
