mod config;
mod error;
mod format;
mod level;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use level::LoggerLevel;

#[cfg(all(target_os = "linux", feature = "journald"))]
const SYSLOG_IDENTIFIER: &str = "tops-lab";

/// Install the global tracing subscriber described by `cfg`.
///
/// Fails with [`LoggerError::Install`] when a subscriber is already set.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let registry = tracing_subscriber::registry().with(cfg.level.filter());

    match cfg.format {
        LoggerFormat::Text => registry
            .with(
                fmt::layer()
                    .with_ansi(cfg.use_color)
                    .with_target(cfg.with_targets)
                    .with_timer(local_timer()),
            )
            .try_init()?,
        LoggerFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(cfg.with_targets)
                    .with_timer(local_timer()),
            )
            .try_init()?,
        #[cfg(all(target_os = "linux", feature = "journald"))]
        LoggerFormat::Journald => {
            let journald = tracing_journald::layer()
                .map_err(LoggerError::Journald)?
                .with_syslog_identifier(SYSLOG_IDENTIFIER.to_string());
            registry.with(journald).try_init()?
        }
    }
    Ok(())
}

// local offset is unavailable once threads exist on some platforms
fn local_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(test)]
mod tests {
    use super::*;

    // the only test in this crate touching the global dispatcher
    #[test]
    fn installs_once() {
        let cfg = LoggerConfig {
            format: LoggerFormat::Json,
            level: LoggerLevel::new("warn,tops_observe=debug").unwrap(),
            ..Default::default()
        };

        logger_init(&cfg).unwrap();
        tracing::debug!("subscriber installed");

        let err = logger_init(&cfg).unwrap_err();
        assert!(matches!(err, LoggerError::Install(_)));
    }
}
