//! Retry engine for completion calls with configurable backoff strategies.

use crate::errors::{CompletionError, MedAgentError, MedAgentResult};
use crate::generate::client::CompletionClient;
use crate::models::message::{CompletionRequest, CompletionResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Upper bound on a server-requested `Retry-After` delay
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Retry strategy configuration
#[derive(Debug, Clone, PartialEq)]
pub enum RetryStrategy {
    /// Fixed delay between retries
    Fixed(Duration),
    /// Exponential backoff with base delay
    ExponentialBackoff {
        base: Duration,
        max: Duration,
        multiplier: f64,
    },
    /// Linear backoff with increment
    Linear {
        initial: Duration,
        increment: Duration,
        max: Duration,
    },
}

/// How many times a completion call is retried and how long to wait in between.
///
/// # Example
/// ```rust
/// use medagents::agents::retry::{RetryPolicy, RetryStrategy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(
///     3,
///     RetryStrategy::ExponentialBackoff {
///         base: Duration::from_millis(100),
///         max: Duration::from_secs(10),
///         multiplier: 2.0,
///     },
/// );
/// assert_eq!(policy.max_attempts(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    strategy: RetryStrategy,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, strategy: RetryStrategy) -> Self {
        Self {
            max_retries,
            strategy,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total attempts: the first call plus every retry
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn strategy(&self) -> &RetryStrategy {
        &self.strategy
    }

    /// Calculate delay for a given retry attempt (0 is the first retry)
    pub fn calculate_delay(&self, retry: u32) -> Duration {
        match &self.strategy {
            RetryStrategy::Fixed(delay) => *delay,
            RetryStrategy::ExponentialBackoff { base, max, multiplier } => {
                let delay = base.as_millis() as f64 * multiplier.powi(retry as i32);
                let delay_ms = delay.min(max.as_millis() as f64) as u64;
                Duration::from_millis(delay_ms)
            }
            RetryStrategy::Linear { initial, increment, max } => {
                let delay = initial.as_millis() + (increment.as_millis() * retry as u128);
                let delay_ms = delay.min(max.as_millis()) as u64;
                Duration::from_millis(delay_ms)
            }
        }
    }

    /// Run `request` against `client` until it succeeds, fails permanently, or the
    /// attempt budget is spent.
    ///
    /// An empty completion counts as a transient failure. `verbose` only raises the
    /// level attempts are logged at.
    pub async fn run(
        &self,
        agent: &str,
        verbose: bool,
        client: &dyn CompletionClient,
        request: &CompletionRequest,
    ) -> MedAgentResult<CompletionResult> {
        let max_attempts = self.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let error = match client.complete(request).await {
                Ok(result) if !result.content.trim().is_empty() => {
                    if verbose {
                        info!(agent, model = client.model_name(), attempt, max_attempts, "completion succeeded");
                    } else {
                        debug!(agent, model = client.model_name(), attempt, max_attempts, "completion succeeded");
                    }
                    return Ok(result);
                }
                Ok(_) => CompletionError::EmptyCompletion,
                Err(error) => error,
            };

            if !error.is_transient() {
                warn!(agent, attempt, error = %error, "completion failed permanently");
                return Err(MedAgentError::Completion {
                    agent: agent.to_string(),
                    source: error,
                });
            }

            if attempt >= max_attempts {
                warn!(agent, attempts = attempt, error = %error, "completion retries exhausted");
                return Err(MedAgentError::RetriesExhausted {
                    agent: agent.to_string(),
                    attempts: attempt,
                    last: error,
                });
            }

            let delay = error
                .retry_after()
                .map(|requested| requested.min(MAX_RETRY_AFTER))
                .unwrap_or_else(|| self.calculate_delay(attempt - 1));

            if verbose {
                info!(agent, attempt, max_attempts, ?delay, error = %error, "completion attempt failed, retrying");
            } else {
                debug!(agent, attempt, max_attempts, ?delay, error = %error, "completion attempt failed, retrying");
            }

            sleep(delay).await;
        }
    }
}
