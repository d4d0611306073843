//! Deadline-bounded retry for collector API calls
//!
//! A call gets one overall deadline. Connect timeouts reported by the
//! transport are retried inside it with a backoff of 0, then one step, then
//! two steps and so on. Everything else fails on the first attempt.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Deadline and backoff growth for one API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Overall time allowed for the call, retries included
    pub deadline: Duration,
    /// Added to the backoff after each failed attempt
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            deadline: config.request_timeout(),
            backoff_step: config.backoff_step(),
        }
    }

    /// Run `attempt` until it succeeds, fails with a non-retryable error, or
    /// the deadline elapses.
    ///
    /// Remaining time is checked before every attempt and every sleep. Each
    /// attempt and each sleep is clamped to the remaining time, so a deadline
    /// that falls inside a backoff ends the call at the deadline.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let mut backoff = Duration::ZERO;

        loop {
            let remaining = self.remaining(started)?;

            let error = match tokio::time::timeout(remaining, attempt()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) if e.is_retryable() => e,
                Ok(Err(e)) => return Err(e),
                Err(_) => return Err(Error::Timeout(self.deadline)),
            };

            let remaining = self.remaining(started)?;
            tracing::warn!(
                error = %error,
                "Sumo Logic API timed out... retrying in {}s",
                backoff.as_secs()
            );
            tokio::time::sleep(backoff.min(remaining)).await;
            backoff += self.backoff_step;
        }
    }

    fn remaining(&self, started: Instant) -> Result<Duration> {
        match self.deadline.checked_sub(started.elapsed()) {
            Some(left) if !left.is_zero() => Ok(left),
            _ => Err(Error::Timeout(self.deadline)),
        }
    }
}
