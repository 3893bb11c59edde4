//! Retry with exponential backoff
//!
//! Used by the catalog client to ride out transient server errors, such as
//! the warm-up faults injected by a chaos-enabled server.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::retry::{RetryConfig, with_retry};
//!
//! let outcome = with_retry(&RetryConfig::default(), || client.fetch_items()).await;
//! println!("took {} attempts", outcome.attempts);
//! ```

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Backoff settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay before the first retry in milliseconds (default: 500ms)
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound for a single delay in milliseconds (default: 8000ms)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Growth factor between consecutive delays (default: 2.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Retries after the first attempt (default: 5)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fraction of each delay randomly added or removed (default: 0.1)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_initial_delay() -> u64 {
    500
}

const fn default_max_delay() -> u64 {
    8_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_max_retries() -> u32 {
    5
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            max_retries: default_max_retries(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryConfig {
    pub const fn new(initial_delay_ms: u64, max_delay_ms: u64, max_retries: u32) -> Self {
        Self {
            initial_delay_ms,
            max_delay_ms,
            multiplier: default_multiplier(),
            max_retries,
            jitter_factor: default_jitter_factor(),
        }
    }

    /// Never retry
    pub const fn none() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn without_jitter(mut self) -> Self {
        self.jitter_factor = 0.0;
        self
    }

    /// Delay before retry number `attempt + 1` (0-based)
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let base = (self.initial_delay_ms as f64) * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay_ms as f64);

        let delay = if self.jitter_factor > 0.0 && capped > 0.0 {
            let range = capped * self.jitter_factor.min(1.0);
            let jitter = rand::rng().random_range(-range..=range);
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(delay as u64)
    }
}

/// Errors that know whether another attempt could succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for application::ApplicationError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

/// Final result of a retried operation plus how it got there
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: Result<T, E>,
    /// Attempts made, the first one included
    pub attempts: u32,
    /// Wall time across all attempts and delays
    pub elapsed: Duration,
}

impl<T, E> RetryOutcome<T, E> {
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Run `operation`, retrying retryable failures per `config`
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> RetryOutcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry_notify(config, operation, |_, _, _| {}).await
}

/// Like [`with_retry`], calling `on_retry(attempt, &error, delay)` before
/// each backoff sleep
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry_notify<F, Fut, T, E, N>(
    config: &RetryConfig,
    mut operation: F,
    mut on_retry: N,
) -> RetryOutcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
    N: FnMut(u32, &E, Duration),
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let err = match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(attempts, "Operation succeeded after retries");
                }
                return RetryOutcome {
                    result: Ok(value),
                    attempts,
                    elapsed: start.elapsed(),
                };
            },
            Err(err) => err,
        };

        let retries_used = attempts - 1;
        if !err.is_retryable() || retries_used >= config.max_retries {
            warn!(attempts, error = %err, "Giving up");
            return RetryOutcome {
                result: Err(err),
                attempts,
                elapsed: start.elapsed(),
            };
        }

        let delay = config.delay_for_attempt(retries_used);
        warn!(
            attempt = attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Attempt failed, retrying"
        );
        on_retry(attempts, &err, delay);
        tokio::time::sleep(delay).await;
    }
}

/// [`with_retry`] without the metadata
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry(config, operation).await.into_result()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use application::ApplicationError;

    use super::*;

    fn counting_failures(
        failures: u32,
        error: fn() -> ApplicationError,
    ) -> (
        Arc<AtomicU32>,
        impl FnMut() -> std::future::Ready<Result<&'static str, ApplicationError>>,
    ) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let op = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if n <= failures { Err(error()) } else { Ok("ok") })
        };
        (calls, op)
    }

    #[test]
    fn defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.initial_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 8_000);
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn delays_grow_exponentially_until_capped() {
        let config = RetryConfig::new(100, 1_000, 10).without_jitter();
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(800));
        assert_eq!(config.delay_for_attempt(4), Duration::from_millis(1_000));
        assert_eq!(config.delay_for_attempt(60), Duration::from_millis(1_000));
    }

    #[test]
    fn jitter_stays_within_factor() {
        let config = RetryConfig::new(1_000, 10_000, 3);
        for _ in 0..200 {
            let delay = config.delay_for_attempt(0).as_millis();
            assert!((900..=1_100).contains(&delay), "delay {delay}");
        }
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: RetryConfig = serde_json::from_str(r#"{"max_retries": 1}"#).unwrap();
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.initial_delay_ms, 500);
    }

    #[tokio::test(start_paused = true)]
    async fn rides_out_warmup_faults() {
        let (calls, op) = counting_failures(4, || ApplicationError::InjectedFault);
        let outcome = with_retry(&RetryConfig::default(), op).await;

        assert_eq!(outcome.result.unwrap(), "ok");
        assert_eq!(outcome.attempts, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_max_retries() {
        let (calls, op) = counting_failures(u32::MAX, || ApplicationError::InjectedFault);
        let outcome = with_retry(&RetryConfig::new(10, 10, 2), op).await;

        assert!(matches!(
            outcome.result,
            Err(ApplicationError::InjectedFault)
        ));
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_errors_fail_immediately() {
        let (calls, op) = counting_failures(1, || ApplicationError::NotFound("Item".to_string()));
        let outcome = with_retry(&RetryConfig::default(), op).await;

        assert!(!outcome.is_ok());
        assert_eq!(outcome.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_includes_backoff() {
        let (_, op) = counting_failures(2, || ApplicationError::InjectedFault);
        let config = RetryConfig::new(100, 1_000, 5).without_jitter();
        let outcome = with_retry(&config, op).await;

        assert!(outcome.is_ok());
        assert!(outcome.elapsed >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_sees_each_retry() {
        let (_, op) = counting_failures(3, || ApplicationError::InjectedFault);
        let config = RetryConfig::new(100, 1_000, 5).without_jitter();
        let mut seen = Vec::new();

        let outcome =
            with_retry_notify(&config, op, |attempt, _err, delay| seen.push((attempt, delay)))
                .await;

        assert!(outcome.is_ok());
        assert_eq!(
            seen,
            vec![
                (1, Duration::from_millis(100)),
                (2, Duration::from_millis(200)),
                (3, Duration::from_millis(400)),
            ]
        );
    }

    #[tokio::test]
    async fn none_config_tries_once() {
        let (calls, op) = counting_failures(1, || ApplicationError::InjectedFault);
        assert!(retry(&RetryConfig::none(), op).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
