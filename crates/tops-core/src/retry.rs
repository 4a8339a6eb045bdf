//! Fixed-delay retry with an injectable sleep.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::UpstreamError;

/// Suspends the current task; swapped out in tests to avoid wall-clock waits.
///
/// [`now`](Sleeper::now) reads the clock the sleeps advance, so elapsed time
/// includes both the pauses and the work done between them.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);

    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Attempt budget and the pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn fixed(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// A single attempt, no waiting.
    pub const fn once() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    fn budget(&self) -> u32 {
        self.attempts.max(1)
    }
}

/// Run `op` until it succeeds or the policy's budget is spent.
///
/// Sleeps only between attempts. On exhaustion the last error is wrapped in
/// [`UpstreamError::Exhausted`].
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    what: &'static str,
    mut op: F,
) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let budget = policy.budget();
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(what, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt >= budget => {
                return Err(UpstreamError::Exhausted {
                    what,
                    attempts: attempt,
                    last: Box::new(e),
                });
            }
            Err(e) => {
                warn!(what, attempt, delay_ms = policy.delay.as_millis() as u64, error = %e, "attempt failed");
                sleeper.sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
