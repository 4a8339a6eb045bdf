use std::time::Duration;

use tops_core::RetryPolicy;

#[derive(Debug, Clone)]
pub struct MetadataConfig {
    /// Metadata service base address (default: `http://metadata.udf`).
    pub base_url: String,
    /// Per-request timeout (default: 5 seconds).
    pub request_timeout_ms: u64,
    /// Attempts per query before giving up (default: 10).
    pub retry_attempts: u32,
    /// Pause between attempts (default: 6 seconds).
    pub retry_delay_ms: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: "http://metadata.udf".to_string(),
            request_timeout_ms: 5_000,
            retry_attempts: 10,
            retry_delay_ms: 6_000,
        }
    }
}

impl MetadataConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.retry_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn validate(&self) -> Result<(), String> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!(
                "metadata base url must be http(s), got '{}'",
                self.base_url
            ));
        }
        if self.retry_attempts == 0 {
            return Err("metadata retry_attempts must be at least 1".into());
        }
        Ok(())
    }
}
