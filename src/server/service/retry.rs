//! Retry logic with capped exponential backoff.
//!
//! Each failure is classified by [`Error::to_retry_strategy`]: permanent errors are
//! returned at once, transient errors are retried after `min(initial * 2^(n-1), max)`,
//! unclassified errors are retried immediately and surfaced on the final attempt.
//! A `retry_after` hint from a rate limited Bot API answer raises the backoff to at
//! least that long.

use std::{future::Future, time::Duration};

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Context for executing operations with automatic retry logic.
///
/// # Retry Behavior
///
/// - **Max attempts**: 3
/// - **Backoff**: 1s, 2s, 4s, ... capped at 5s
/// - **Worst case**: 3s of backoff before the final attempt
///
/// # Example
///
/// ```ignore
/// let ctx = RetryContext::new();
///
/// ctx.execute_with_retry("refund for payment ID abc", || async {
///     telegram_client
///         .refund_star_payment(user_id, &charge_id)
///         .await
///         .map_err(Error::from)
/// })
/// .await?;
/// ```
pub struct RetryContext {
    /// Maximum number of attempts before giving up
    max_attempts: u32,
    /// Backoff before the first retry, doubled for each further retry
    initial_backoff: Duration,
    /// Upper bound of a single backoff
    max_backoff: Duration,
}

impl RetryContext {
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(1000);
    const DEFAULT_MAX_BACKOFF: Duration = Duration::from_millis(5000);

    /// Creates a new retry context with 3 attempts and 1s initial backoff capped at 5s.
    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Self::DEFAULT_INITIAL_BACKOFF,
            max_backoff: Self::DEFAULT_MAX_BACKOFF,
        }
    }

    /// Overrides the backoff schedule.
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Backoff before retry number `retry` (1-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Executes an operation with automatic retry logic.
    ///
    /// # Arguments
    /// - `description` - Human-readable description for logging (e.g., "refund for payment ID abc")
    /// - `operation` - Produces a fresh future for every attempt
    ///
    /// # Returns
    /// - `Ok(R)` - Operation succeeded
    /// - `Err(Error)` - Operation failed permanently or exhausted all attempts
    pub async fn execute_with_retry<R, F, Fut>(
        &self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<R, Error>>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            let error = match operation().await {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => e,
            };

            attempt_count += 1;

            let backoff = match error.to_retry_strategy() {
                ErrorRetryStrategy::Fail => {
                    tracing::error!("Permanent error for {}: {:?}", description, error);
                    return Err(error);
                }
                _ if attempt_count >= self.max_attempts => {
                    tracing::error!(
                        "Max attempts ({}) exceeded for {}: {:?}",
                        self.max_attempts,
                        description,
                        error
                    );
                    return Err(error);
                }
                // A rate limited answer names the shortest acceptable wait
                ErrorRetryStrategy::Retry => self
                    .backoff_for(attempt_count)
                    .max(error.retry_after().unwrap_or_default()),
                ErrorRetryStrategy::Unclassified => Duration::ZERO,
            };

            tracing::warn!(
                "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                description,
                attempt_count,
                self.max_attempts,
                backoff,
                error
            );

            if !backoff.is_zero() {
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}
