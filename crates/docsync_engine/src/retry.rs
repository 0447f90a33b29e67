use std::future::Future;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};

use crate::FetchError;

/// Exponential backoff parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries beyond the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub backoff_factor: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs_f64(2.0),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs_f64(30.0),
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget, no sleeping between attempts.
    pub fn without_delay(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            backoff_factor: 1.0,
            max_delay: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Sleep durations between consecutive attempts, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        let mut delay = self.base_delay.min(self.max_delay);
        (0..self.max_retries).map(move |_| {
            let current = delay;
            delay = self.next_delay(delay);
            current
        })
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        let scaled = (delay.as_secs_f64() * self.backoff_factor).max(0.0);
        Duration::from_secs_f64(scaled.min(self.max_delay.as_secs_f64()))
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent. The last retryable error is returned in the latter case.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut delays = policy.delays();
    let mut attempt: u32 = 1;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !err.is_retryable() {
            engine_debug!("Non-retryable error for {}: {}", label, err);
            return Err(err);
        }

        let Some(delay) = delays.next() else {
            engine_warn!(
                "Max retries ({}) exceeded for {}",
                policy.max_retries,
                label
            );
            return Err(err);
        };

        engine_warn!(
            "Attempt {}/{} failed for {}: {}. Retrying in {:.1}s...",
            attempt,
            policy.max_attempts(),
            label,
            err,
            delay.as_secs_f64()
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::{retry_with_backoff, RetryPolicy};
    use crate::{FailureKind, FetchError};

    #[test]
    fn default_schedule_doubles_and_caps() {
        let policy = RetryPolicy {
            max_retries: 6,
            ..RetryPolicy::default()
        };
        let secs: Vec<f64> = policy.delays().map(|d| d.as_secs_f64()).collect();
        assert_eq!(secs, vec![2.0, 4.0, 8.0, 16.0, 30.0, 30.0]);
        assert_eq!(RetryPolicy::default().max_attempts(), 4);
    }

    #[test]
    fn base_delay_above_cap_is_clamped() {
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_secs(60),
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(5),
        };
        let delays: Vec<Duration> = policy.delays().collect();
        assert_eq!(delays, vec![Duration::from_secs(5), Duration::from_secs(5)]);
    }

    #[tokio::test]
    async fn retries_network_errors_until_budget_is_spent() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let policy = RetryPolicy::without_delay(3);

        let result: Result<(), FetchError> = retry_with_backoff(&policy, "test", move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::new(FailureKind::Network, "connection refused"))
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind, FailureKind::Network);
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn recovers_after_transient_http_errors() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let policy = RetryPolicy::without_delay(3);

        let result = retry_with_backoff(&policy, "test", move || async move {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(FetchError::new(FailureKind::HttpStatus(503), "unavailable"))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn content_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let policy = RetryPolicy::without_delay(3);

        let result: Result<(), FetchError> = retry_with_backoff(&policy, "test", move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::new(
                FailureKind::ContentTooShort {
                    min_bytes: 100,
                    actual: 3,
                },
                "too short",
            ))
        })
        .await;

        assert!(matches!(
            result.unwrap_err().kind,
            FailureKind::ContentTooShort { .. }
        ));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let policy = RetryPolicy::without_delay(0);

        let result: Result<(), FetchError> = retry_with_backoff(&policy, "test", move || async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::new(FailureKind::Timeout, "slow"))
        })
        .await;

        assert_eq!(result.unwrap_err().kind, FailureKind::Timeout);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
