//! Bounded exponential-backoff retry for single API calls.

use crate::errors::{Error, Result, TransportFailure};
use log::{debug, warn};
use std::thread;
use std::time::Duration;

/// How many times to try a request and how long to wait in between.
///
/// The delay after the failed attempt `n` (0-based) is `base_delay * 2^n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first try included. Always at least 1.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy; `max_attempts` of 0 is treated as 1.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// A policy that tries once and never sleeps.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Backoff delay after the failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            crate::constants::DEFAULT_RETRIES,
            Duration::from_millis(crate::constants::DEFAULT_RETRY_DELAY_MS),
        )
    }
}

/// Runs `op` until it succeeds or the policy is exhausted.
///
/// `op` receives the 0-based attempt number. Only [`TransportFailure`]s are
/// retried; anything the caller wants to fail fast on must be decided after
/// this returns (HTTP status, JSON shape). On exhaustion the last failure is
/// wrapped in [`Error::Transport`] labelled with `endpoint`.
pub fn with_retry<T, F>(policy: &RetryPolicy, endpoint: &str, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> std::result::Result<T, TransportFailure>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op(attempt) {
            Ok(value) => {
                if attempt > 0 {
                    debug!("'{}' succeeded on attempt {}", endpoint, attempt + 1);
                }
                return Ok(value);
            }
            Err(failure) if attempt + 1 < max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "Attempt {}/{} for '{}' failed: {}. Retrying in {:?}",
                    attempt + 1,
                    max_attempts,
                    endpoint,
                    failure,
                    delay
                );
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                attempt += 1;
            }
            Err(failure) => {
                return Err(Error::Transport {
                    endpoint: endpoint.to_string(),
                    attempts: attempt + 1,
                    source: failure,
                });
            }
        }
    }
}
