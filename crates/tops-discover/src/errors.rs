use thiserror::Error;
use tops_core::UpstreamError;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("metadata service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid metadata response: {0}")]
    InvalidResponse(String),
}

impl From<DiscoverError> for UpstreamError {
    fn from(err: DiscoverError) -> Self {
        match err {
            DiscoverError::HttpRequest(e) => UpstreamError::Transport(e.to_string()),
            DiscoverError::Status { status, body } => UpstreamError::Status { status, body },
            DiscoverError::InvalidResponse(msg) => UpstreamError::Parse(msg),
        }
    }
}
