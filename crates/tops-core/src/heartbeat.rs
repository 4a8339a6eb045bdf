//! Periodic publication of the deployment metadata.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tops_model::{DeploymentState, ModelError};
use tracing::{debug, error, info, warn};

use crate::{
    config::HeartbeatConfig,
    error::{CoreError, UpstreamError},
    ports::QueuePublisher,
    retry::Sleeper,
};

/// Publisher state between two publish attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatState {
    Running,
    /// Consecutive failures so far.
    Retrying(u32),
    Terminated,
}

impl HeartbeatState {
    pub fn on_success(self) -> Self {
        match self {
            HeartbeatState::Terminated => HeartbeatState::Terminated,
            _ => HeartbeatState::Running,
        }
    }

    pub fn on_failure(self, max_failures: u32) -> Self {
        let failures = match self {
            HeartbeatState::Running => 1,
            HeartbeatState::Retrying(n) => n + 1,
            HeartbeatState::Terminated => return HeartbeatState::Terminated,
        };
        if failures >= max_failures {
            HeartbeatState::Terminated
        } else {
            HeartbeatState::Retrying(failures)
        }
    }

    pub fn failures(&self) -> u32 {
        match self {
            HeartbeatState::Retrying(n) => *n,
            _ => 0,
        }
    }
}

pub struct HeartbeatPublisher<'a> {
    queue: &'a dyn QueuePublisher,
    sleeper: &'a dyn Sleeper,
    config: HeartbeatConfig,
}

impl<'a> HeartbeatPublisher<'a> {
    pub fn new(
        queue: &'a dyn QueuePublisher,
        sleeper: &'a dyn Sleeper,
        config: HeartbeatConfig,
    ) -> Self {
        Self {
            queue,
            sleeper,
            config,
        }
    }

    /// Publish `state` forever.
    ///
    /// Returns `Ok(())` only when `cancel` fires while waiting. After
    /// `max_failures` consecutive failed publishes it returns
    /// [`CoreError::HeartbeatExhausted`].
    pub async fn run(
        &self,
        state: &DeploymentState,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        let body = serde_json::to_string(&state.metadata)
            .map_err(|e| CoreError::Model(ModelError::Encode(e.to_string())))?;
        let max_failures = self.config.max_failures.max(1);
        let mut current = HeartbeatState::Running;

        loop {
            if cancel.is_cancelled() {
                return Ok(());
            }
            debug!(petname = %state.petname(), "publishing heartbeat");

            let delay = match self.queue.publish(&body).await {
                Ok(message_id) => {
                    if current != HeartbeatState::Running {
                        info!(after = current.failures(), "heartbeat recovered");
                    }
                    current = current.on_success();
                    info!(%message_id, "heartbeat sent");
                    self.config.interval()
                }
                Err(e) => {
                    let next = current.on_failure(max_failures);
                    if next == HeartbeatState::Terminated {
                        error!(failures = max_failures, error = %e, "heartbeat failure budget exhausted");
                        return Err(exhausted(max_failures, e));
                    }
                    warn!(failures = next.failures(), max_failures, error = %e, "heartbeat failed");
                    current = next;
                    self.config.retry_delay()
                }
            };

            if !self.pause(delay, cancel).await {
                return Ok(());
            }
        }
    }

    /// Returns `false` when cancelled during the pause.
    async fn pause(&self, delay: Duration, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = self.sleeper.sleep(delay) => true,
        }
    }
}

fn exhausted(failures: u32, last: UpstreamError) -> CoreError {
    CoreError::HeartbeatExhausted { failures, last }
}
