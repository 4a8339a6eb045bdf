use std::{fmt, str::FromStr};

use tracing_subscriber::{EnvFilter, filter::Directive};

use crate::logger::error::LoggerError;

/// Comma-separated filter directives, e.g. `info,tops_core=debug`.
///
/// Parsed once on construction; [`filter`](LoggerLevel::filter) cannot fail.
#[derive(Debug, Clone)]
pub struct LoggerLevel {
    raw: String,
    directives: Vec<Directive>,
}

impl LoggerLevel {
    pub fn new(raw: impl Into<String>) -> Result<Self, LoggerError> {
        let raw = raw.into();
        let directives = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<Directive>()
                    .map_err(|e| LoggerError::InvalidFilter {
                        directive: part.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if directives.is_empty() {
            return Err(LoggerError::InvalidFilter {
                directive: raw,
                reason: "no directives".into(),
            });
        }
        Ok(Self { raw, directives })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Fresh filter for a subscriber; `EnvFilter` is not `Clone`.
    pub fn filter(&self) -> EnvFilter {
        self.directives
            .iter()
            .cloned()
            .fold(EnvFilter::default(), EnvFilter::add_directive)
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self {
            raw: "info".to_string(),
            directives: vec![tracing::level_filters::LevelFilter::INFO.into()],
        }
    }
}

impl PartialEq for LoggerLevel {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for LoggerLevel {}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
