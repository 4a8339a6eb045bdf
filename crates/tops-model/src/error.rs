use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("lab info has no '{0}' entry")]
    MissingQueueUrl(&'static str),
    #[error("invalid queue url '{url}': {reason}")]
    InvalidQueueUrl { url: String, reason: String },
    #[error("lab info must be a mapping, got {0}")]
    NotAMapping(&'static str),
    #[error("failed to encode state document: {0}")]
    Encode(String),
}
