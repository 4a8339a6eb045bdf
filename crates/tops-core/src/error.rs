use std::time::Duration;

use thiserror::Error;
use tops_model::ModelError;

/// Failure talking to an external collaborator (metadata service, object store, queue).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{what} failed after {attempts} attempts: {last}")]
    Exhausted {
        what: &'static str,
        attempts: u32,
        #[source]
        last: Box<UpstreamError>,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reasons a state document cannot be exposed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'metadata' is missing or empty in state file")]
    MissingMetadata,

    #[error("'labinfo' is missing or empty in state file")]
    MissingLabInfo,

    #[error("'petname' is missing in metadata")]
    MissingPetname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The process must stop; a supervisor restarts it.
    Fatal,
    /// The caller may try again later.
    Retryable,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("metadata service: {0}")]
    Metadata(#[source] UpstreamError),

    #[error("lab info lookup for '{lab_id}': {source}")]
    LabInfo {
        lab_id: String,
        #[source]
        source: UpstreamError,
    },

    #[error("lab info: {0}")]
    Model(#[from] ModelError),

    #[error("queue publish: {0}")]
    Queue(#[source] UpstreamError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid state: {0}")]
    Validation(#[from] ValidationError),

    #[error("no current state after {attempts} attempts ({waited:?} waited)")]
    NoCurrentState { attempts: u32, waited: Duration },

    #[error("heartbeat failed {failures} consecutive times: {last}")]
    HeartbeatExhausted {
        failures: u32,
        #[source]
        last: UpstreamError,
    },
}

impl CoreError {
    /// Classify for the top-level driver.
    ///
    /// Single upstream failures that have not yet consumed a retry budget are
    /// retryable; everything that reaches a driver after its budget is spent,
    /// or that stems from bad lab configuration, is fatal.
    pub fn severity(&self) -> Severity {
        match self {
            CoreError::Metadata(e) | CoreError::Queue(e) => match e {
                UpstreamError::Exhausted { .. } => Severity::Fatal,
                _ => Severity::Retryable,
            },
            CoreError::LabInfo { .. }
            | CoreError::Model(_)
            | CoreError::Store(_)
            | CoreError::Validation(_)
            | CoreError::NoCurrentState { .. }
            | CoreError::HeartbeatExhausted { .. } => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}
