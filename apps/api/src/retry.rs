//! Reusable retry policy for outbound provider calls.
//!
//! Both the LLM client and the embedding client retry transient failures
//! (network errors, 429, 5xx) with exponential backoff before surfacing a
//! terminal error. The schedule lives here so each collaborator declares
//! its own budget instead of duplicating the loop.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay before the given attempt (1-based; attempt 0 never sleeps).
    /// Doubles per attempt: base, 2x base, 4x base, ...
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * (1 << (attempt.saturating_sub(1)))
    }

    /// Runs `op` up to `max_attempts` times, sleeping between attempts.
    /// Errors for which `is_retryable` returns false are returned
    /// immediately; the last retryable error is returned on exhaustion.
    pub async fn run<T, E, F, Fut>(
        &self,
        label: &str,
        mut op: F,
        is_retryable: impl Fn(&E) -> bool,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut last_error: Option<E> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = self.backoff_delay(attempt);
                warn!(
                    "{label}: attempt {attempt} failed, retrying after {}ms",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if is_retryable(&e) => {
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        // max_attempts >= 1, so at least one error was recorded
        Err(last_error.expect("retry loop ran zero attempts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    const POLICY: RetryPolicy = RetryPolicy::new(3, Duration::from_millis(100));

    #[test]
    fn test_backoff_doubles_per_attempt() {
        assert_eq!(POLICY.backoff_delay(1), Duration::from_millis(100));
        assert_eq!(POLICY.backoff_delay(2), Duration::from_millis(200));
        assert_eq!(POLICY.backoff_delay(3), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = POLICY
            .run(
                "test",
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n < 2 {
                            Err("transient".to_string())
                        } else {
                            Ok(42)
                        }
                    }
                },
                |_| true,
            )
            .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = POLICY
            .run(
                "test",
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err("still down".to_string()) }
                },
                |_| true,
            )
            .await;

        assert_eq!(result, Err("still down".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = POLICY
            .run(
                "test",
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err("bad request".to_string()) }
                },
                |e| e != "bad request",
            )
            .await;

        assert_eq!(result, Err("bad request".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
