use std::path::PathBuf;

use clap::Parser;
use tops_observe::{LoggerFormat, LoggerLevel};

#[derive(Debug, Parser)]
#[command(
    name = "tops-labd",
    about = "Discover the lab deployment, persist its identity and publish heartbeats"
)]
pub struct Cli {
    /// Bucket holding `{labID}.yaml` lab configuration documents.
    #[arg(long, env = "LAB_INFO_BUCKET")]
    pub bucket: String,

    /// Region of the lab configuration bucket.
    #[arg(long, env = "LAB_INFO_REGION", default_value = "us-east-1")]
    pub bucket_region: String,

    /// Base address of the cloud metadata service.
    #[arg(long, env = "METADATA_BASE_URL", default_value = "http://metadata.udf")]
    pub metadata_url: String,

    /// Persisted deployment state document.
    #[arg(long, env = "STATE_FILE", default_value = "/state/deployment_state.json")]
    pub state_file: PathBuf,

    /// Seconds between successful heartbeats.
    #[arg(long, env = "HEARTBEAT_INTERVAL_SECS", default_value_t = 90)]
    pub heartbeat_interval_secs: u64,

    /// Endpoint override for S3/SQS emulators.
    #[arg(long, env = "TOPS_AWS_ENDPOINT")]
    pub aws_endpoint: Option<String>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LoggerLevel,

    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,
}
