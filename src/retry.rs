//! Retry logic with exponential backoff
//!
//! Blocking counterpart of the usual async retry loop: the operation runs on
//! the calling thread and the thread sleeps between attempts. Only errors
//! classified as retryable re-enter the loop, everything else is returned on
//! the first failure.

use std::fmt::Display;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::FetchError;

/// Classifies errors as worth retrying or not
///
/// Rate limiting, server errors and network failures are transient. Bad
/// credentials, empty results and malformed responses are not.
pub trait IsRetryable {
    /// Returns true if the operation should be tried again
    fn is_retryable(&self) -> bool;

    /// Minimum wait the remote side asked for, if any
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl IsRetryable for FetchError {
    fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transient { .. } | FetchError::Network(_))
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            FetchError::Transient { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Runs `operation` until it succeeds, fails permanently, or the retry budget
/// in `config` is spent.
///
/// The operation receives the 1-based attempt number. At most
/// `config.max_retries + 1` attempts are made.
pub fn with_retry<F, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
    E: IsRetryable + Display,
{
    let mut retries = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation(retries + 1) {
            Ok(result) => {
                if retries > 0 {
                    tracing::info!(attempts = retries + 1, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && retries < config.max_retries => {
                retries += 1;

                let base = match e.retry_after() {
                    Some(asked) => delay.max(asked),
                    None => delay,
                }
                .min(config.max_delay);
                let wait = if config.jitter {
                    add_jitter(base, config.max_delay)
                } else {
                    base
                };

                tracing::warn!(
                    error = %e,
                    retry = retries,
                    max_retries = config.max_retries,
                    delay_ms = wait.as_millis(),
                    "Request failed, retrying"
                );

                std::thread::sleep(wait);

                delay = next_delay(delay, config);
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(
                        error = %e,
                        attempts = retries + 1,
                        "Request failed after all retries were used"
                    );
                } else {
                    tracing::debug!(error = %e, "Request failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}

/// Stretches `delay` by a random factor between 1 and 2, never past `cap`.
fn add_jitter(delay: Duration, cap: Duration) -> Duration {
    let jitter_factor: f64 = rand::random();
    Duration::try_from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
        .unwrap_or(cap)
        .min(cap)
}

/// Multiplies `delay` by the backoff factor, capped at `config.max_delay`.
fn next_delay(delay: Duration, config: &RetryConfig) -> Duration {
    Duration::try_from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier)
        .unwrap_or(config.max_delay)
        .min(config.max_delay)
}
