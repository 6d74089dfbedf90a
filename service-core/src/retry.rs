//! Retry with exponential backoff for calls to rate-limited remote services.
//!
//! Only throttling failures are retried. Every other failure is returned on
//! first occurrence. Two budgets bound the retry loop: the number of
//! attempts, and the cumulative time spent waiting between attempts. The
//! wait budget is checked before sleeping, so an oversized wait aborts
//! without being slept.

use rand::Rng;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

/// Classifies an error as a remote throttling signal.
pub trait Throttled {
    fn is_throttling(&self) -> bool;
}

/// Configuration for retry behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Maximum number of attempts, including the first one.
    pub max_retries: u32,
    /// Delay before the first retry, before jitter. Doubles after each retry.
    pub base_delay: Duration,
    /// Upper bound on the summed waits across all retries.
    pub timeout_limit: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(500),
            timeout_limit: Duration::from_secs(20),
        }
    }
}

impl BackoffConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_timeout_limit(mut self, timeout_limit: Duration) -> Self {
        self.timeout_limit = timeout_limit;
        self
    }
}

#[derive(Debug, Error)]
pub enum BackoffError<E> {
    #[error("Exceeded total retry timeout limit of {limit:?} after {attempts} attempt(s)")]
    TimeoutExceeded { attempts: u32, limit: Duration },

    #[error("Max retries reached due to throttling after {attempts} attempt(s)")]
    RetriesExhausted { attempts: u32 },

    #[error("{0}")]
    Operation(E),
}

/// Wait before the next attempt: the current delay plus up to one second of
/// uniform jitter.
fn next_wait(current_delay: Duration) -> Duration {
    let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
    current_delay + Duration::from_secs_f64(jitter)
}

/// Run `operation`, retrying throttled failures with jittered exponential
/// backoff.
///
/// # Example
/// ```ignore
/// let text = call_with_backoff(&BackoffConfig::default(), "invoke_model", || async {
///     provider.generate(&prompt, &params).await
/// })
/// .await?;
/// ```
pub async fn call_with_backoff<F, Fut, T, E>(
    config: &BackoffConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, BackoffError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Throttled + fmt::Display,
{
    let max_attempts = config.max_retries.max(1);
    let mut delay = config.base_delay;
    let mut total_wait = Duration::ZERO;
    let mut attempt = 0;

    loop {
        attempt += 1;

        let err = match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        operation = operation_name,
                        attempt, "Call succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(err) => err,
        };

        if !err.is_throttling() {
            return Err(BackoffError::Operation(err));
        }

        if attempt >= max_attempts {
            warn!(
                operation = operation_name,
                attempt,
                error = %err,
                "Throttled on final attempt, giving up"
            );
            return Err(BackoffError::RetriesExhausted { attempts: attempt });
        }

        let wait = next_wait(delay);
        total_wait += wait;
        if total_wait > config.timeout_limit {
            warn!(
                operation = operation_name,
                attempt,
                total_wait_ms = total_wait.as_millis() as u64,
                limit_ms = config.timeout_limit.as_millis() as u64,
                "Retry wait budget exceeded"
            );
            return Err(BackoffError::TimeoutExceeded {
                attempts: attempt,
                limit: config.timeout_limit,
            });
        }

        warn!(
            operation = operation_name,
            attempt,
            wait_ms = wait.as_millis() as u64,
            "Throttled, retrying after backoff"
        );

        sleep(wait).await;
        delay = delay.saturating_mul(2);
    }
}
