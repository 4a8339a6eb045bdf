use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tops_core::GateConfig;
use tops_observe::{LoggerFormat, LoggerLevel};

#[derive(Debug, Parser)]
#[command(
    name = "tops-infod",
    about = "Serve the current lab deployment state over a read-only HTTP API"
)]
pub struct Cli {
    /// Base address of the cloud metadata service.
    #[arg(long, env = "METADATA_BASE_URL", default_value = "http://metadata.udf")]
    pub metadata_url: String,

    /// Persisted deployment state document.
    #[arg(long, env = "STATE_FILE", default_value = "/state/deployment_state.json")]
    pub state_file: PathBuf,

    /// Address the HTTP API listens on.
    #[arg(long, env = "INFO_BIND", default_value = "0.0.0.0:5123")]
    pub bind: SocketAddr,

    /// Seconds between state checks.
    #[arg(long, env = "STATE_WAIT_DELAY_SECS", default_value_t = 5)]
    pub wait_delay_secs: u64,

    /// Give up when no current state appeared within this many seconds.
    #[arg(long, env = "STATE_MAX_WAIT_SECS", default_value_t = 60)]
    pub max_wait_secs: u64,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LoggerLevel,

    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,
}

impl Cli {
    /// One attempt per delay step within the wait ceiling.
    pub fn gate_config(&self) -> GateConfig {
        let delay = self.wait_delay_secs.max(1);
        let max_attempts = (self.max_wait_secs / delay).max(1);
        GateConfig {
            max_attempts: u32::try_from(max_attempts).unwrap_or(u32::MAX),
            delay_ms: delay * 1_000,
            max_wait_ms: self.max_wait_secs.saturating_mul(1_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gate_waits_a_minute_in_five_second_steps() {
        let cli = Cli::try_parse_from(["tops-infod"]).unwrap();
        let gate = cli.gate_config();
        assert_eq!(gate.max_attempts, 12);
        assert_eq!(gate.delay_ms, 5_000);
        assert_eq!(gate.max_wait_ms, 60_000);
        assert_eq!(cli.bind, "0.0.0.0:5123".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn short_ceiling_still_allows_one_attempt() {
        let cli = Cli::try_parse_from(["tops-infod", "--max-wait-secs", "0"]).unwrap();
        assert_eq!(cli.gate_config().max_attempts, 1);
    }
}
