use backoff::{ExponentialBackoff, backoff::Backoff};
use std::future::Future;
use std::time::Duration;

/// Retry configuration for local operations that must not be left half done
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    pub max_retries: u32,
    /// Initial retry delay
    pub initial_delay: Duration,
    /// Maximum retry delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a config for quick retry (shorter delays, fewer attempts)
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
            multiplier: 1.5,
        }
    }

    /// Single attempt, no waiting. Used by tests and by callers that want to
    /// surface the first failure.
    pub fn none() -> Self {
        Self {
            max_retries: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }
}

/// Retry executor with exponential backoff
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Execute an async operation, retrying every error until the attempt
    /// budget runs out
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        self.execute_if(operation, |_| true).await
    }

    /// Execute an async operation, retrying only errors accepted by `retryable`
    pub async fn execute_if<F, Fut, T, E, P>(&self, operation: F, retryable: P) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        P: Fn(&E) -> bool,
    {
        let mut backoff = ExponentialBackoff {
            initial_interval: self.config.initial_delay,
            max_interval: self.config.max_delay,
            multiplier: self.config.multiplier,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if attempt >= self.config.max_retries || !retryable(&error) {
                        return Err(error);
                    }

                    match backoff.next_backoff() {
                        Some(delay) => {
                            log::warn!(
                                "Attempt {} failed ({}), retrying after {:?}",
                                attempt,
                                error,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => return Err(error),
                    }
                }
            }
        }
    }
}
