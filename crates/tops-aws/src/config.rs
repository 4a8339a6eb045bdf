/// Where lab-configuration documents live.
#[derive(Debug, Clone)]
pub struct LabInfoConfig {
    /// Bucket holding one `{labID}.yaml` per lab.
    pub bucket: String,
    /// Region of the bucket (default: `us-east-1`).
    pub region: String,
    /// Endpoint override for S3-compatible emulators.
    pub endpoint_url: Option<String>,
}

impl LabInfoConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: "us-east-1".to_string(),
            endpoint_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("lab info bucket is not set".into());
        }
        if self.region.trim().is_empty() {
            return Err("lab info region is not set".into());
        }
        Ok(())
    }
}

/// Heartbeat queue client options. Address and region come from lab info.
#[derive(Debug, Clone, Default)]
pub struct QueueConfig {
    /// Endpoint override for SQS-compatible emulators.
    pub endpoint_url: Option<String>,
}
