//! Bounded polling with exponential backoff.
//!
//! Used where a record is expected to show up shortly but is created by
//! someone else, e.g. the profile row written by the identity provider's
//! sign-up hook. Every wait can be interrupted through a cancellation
//! receiver owned by the caller.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Adds up to 10% random delay on top of each backoff step.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder { policy: Self::default() }
    }

    /// Delay after the given failed attempt (0-based), capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let base_ms = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        let capped_ms = base_ms.min(self.max_delay.as_millis() as f64);

        let jitter_ms = if self.jitter && capped_ms >= 1.0 {
            rand::thread_rng().gen_range(0.0..capped_ms * 0.1)
        } else {
            0.0
        };

        Duration::from_millis((capped_ms + jitter_ms) as u64)
    }
}

pub struct RetryPolicyBuilder {
    policy: RetryPolicy,
}

impl RetryPolicyBuilder {
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.policy.max_attempts = max_attempts.max(1);
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.policy.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.policy.max_delay = delay;
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.policy.multiplier = multiplier;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.policy.jitter = false;
        self
    }

    pub fn build(self) -> RetryPolicy {
        self.policy
    }
}

/// Polls `operation` until it yields `Some`.
///
/// Errors from `operation` are returned immediately; only "not there yet"
/// is retried. Exhausting the policy gives `NotFound(what)`. A message on
/// `cancel`, or all of its senders being dropped, gives `Cancelled`.
pub async fn poll_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &mut broadcast::Receiver<()>,
    what: &str,
    mut operation: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, AppError>>,
{
    for attempt in 0..policy.max_attempts {
        if let Some(value) = operation().await? {
            if attempt > 0 {
                info!(attempt, "{} became available after polling", what);
            }
            return Ok(value);
        }

        if attempt + 1 == policy.max_attempts {
            break;
        }

        let delay = policy.delay_for_attempt(attempt);
        debug!(attempt, delay_ms = delay.as_millis() as u64, "{} not available yet", what);

        tokio::select! {
            _ = sleep(delay) => {}
            _ = cancel.recv() => return Err(AppError::Cancelled),
        }
    }

    Err(AppError::NotFound(format!("{} not found", what)))
}
