//! Reader side of the lab deployment state.
//!
//! Waits for a state document that belongs to the live deployment, validates
//! it, and serves it read-only.

mod cli;
mod signal;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use tops_api::InfoApi;
use tops_core::{CoreError, RetryPolicy, StateGate, StateStore, TokioSleeper, validate};
use tops_discover::{HttpMetadataClient, MetadataConfig};
use tops_observe::{LoggerConfig, logger_init};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1) Logger
    let cfg = LoggerConfig {
        format: cli.log_format,
        level: cli.log_level.clone(),
        ..Default::default()
    };
    if let Err(e) = logger_init(&cfg) {
        eprintln!("failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }
    info!("logger initialized");

    match run(cli).await {
        Ok(()) => {
            info!("stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<CoreError>() {
                Some(core) => error!(severity = ?core.severity(), "{e:#}"),
                None => error!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // 2) Configuration
    let metadata_cfg = MetadataConfig {
        base_url: cli.metadata_url.clone(),
        ..Default::default()
    };
    metadata_cfg.validate().map_err(anyhow::Error::msg)?;
    let gate_cfg = cli.gate_config();
    gate_cfg.validate().map_err(anyhow::Error::msg)?;

    // 3) Wait for current state; the gate owns the retry cadence
    let metadata = HttpMetadataClient::new(&metadata_cfg)
        .context("building metadata client")?
        .with_policy(RetryPolicy::once());
    let store = StateStore::new(&cli.state_file);
    let doc = StateGate::new(&store, &metadata, &TokioSleeper, gate_cfg)
        .wait_for_current_state()
        .await?;
    let snapshot = validate(doc).map_err(CoreError::from)?;
    info!(petname = %snapshot.petname, "state file loaded");

    // 4) Serve
    let router = InfoApi::new(snapshot).router();
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    info!("info API listening on {}", cli.bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(signal::shutdown_signal())
        .await
        .context("serving info API")?;
    Ok(())
}
