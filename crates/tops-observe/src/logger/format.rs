use std::{fmt, str::FromStr};

use crate::logger::error::LoggerError;

/// Output sink of the service log.
///
/// `Journald` only exists where it can be installed, so a parsed format is
/// always usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerFormat {
    Text,
    Json,
    #[cfg(all(target_os = "linux", feature = "journald"))]
    Journald,
}

impl LoggerFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            #[cfg(all(target_os = "linux", feature = "journald"))]
            LoggerFormat::Journald => "journald",
        }
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            #[cfg(all(target_os = "linux", feature = "journald"))]
            "journald" | "journal" => Ok(LoggerFormat::Journald),
            #[cfg(not(all(target_os = "linux", feature = "journald")))]
            "journald" | "journal" => Err(LoggerError::JournaldUnavailable),
            _ => Err(LoggerError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
