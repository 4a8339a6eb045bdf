use thiserror::Error;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format '{0}' (expected text, json or journald)")]
    UnknownFormat(String),

    #[error("journald output needs linux and the `journald` feature")]
    JournaldUnavailable,

    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[cfg(all(target_os = "linux", feature = "journald"))]
    #[error("cannot open journald socket: {0}")]
    Journald(#[source] std::io::Error),

    #[error("cannot install global subscriber: {0}")]
    Install(#[from] TryInitError),
}
