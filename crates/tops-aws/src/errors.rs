use thiserror::Error;
use tops_core::UpstreamError;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("s3 request failed: {0}")]
    S3(String),

    #[error("object s3://{bucket}/{key} not found")]
    NoSuchKey { bucket: String, key: String },

    #[error("cannot decode lab info: {0}")]
    Decode(String),

    #[error("sqs request failed: {0}")]
    Sqs(String),

    #[error("sqs response carried no message id")]
    MissingMessageId,
}

impl From<AwsError> for UpstreamError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::S3(msg) | AwsError::Sqs(msg) => UpstreamError::Transport(msg),
            e @ AwsError::NoSuchKey { .. } => UpstreamError::NotFound(e.to_string()),
            AwsError::Decode(msg) => UpstreamError::Parse(msg),
            e @ AwsError::MissingMessageId => UpstreamError::Parse(e.to_string()),
        }
    }
}
