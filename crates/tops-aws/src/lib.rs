mod config;
pub use config::{LabInfoConfig, QueueConfig};

mod errors;
pub use errors::AwsError;

mod sdk;

mod s3;
pub use s3::{S3LabInfoSource, lab_info_key, parse_lab_info};

mod sqs;
pub use sqs::SqsQueue;
