use std::time::Duration;

/// Heartbeat cadence and failure budget.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Pause after a successful publish (default: 90 seconds).
    pub interval_ms: u64,
    /// Pause after a failed publish (default: 6 seconds).
    pub retry_delay_ms: u64,
    /// Consecutive failures that terminate the publisher (default: 3).
    pub max_failures: u32,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval_ms: 90_000,
            retry_delay_ms: 6_000,
            max_failures: 3,
        }
    }
}

impl HeartbeatConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.interval_ms == 0 {
            return Err("heartbeat interval must be positive".into());
        }
        if self.max_failures == 0 {
            return Err("heartbeat max_failures must be at least 1".into());
        }
        Ok(())
    }
}

/// Bounds for waiting on a current state document.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Upper bound on load-and-compare attempts (default: 12).
    pub max_attempts: u32,
    /// Pause between attempts (default: 5 seconds).
    pub delay_ms: u64,
    /// Ceiling on total time spent waiting (default: 60 seconds).
    pub max_wait_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_attempts: 12,
            delay_ms: 5_000,
            max_wait_ms: 60_000,
        }
    }
}

impl GateConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("gate max_attempts must be at least 1".into());
        }
        Ok(())
    }
}
