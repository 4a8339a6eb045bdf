//! Writer side of the lab deployment state.
//!
//! Fetches metadata and lab info, persists the deployment state with a stable
//! petname, then publishes a heartbeat until the failure budget is spent.

mod cli;
mod signal;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use tops_aws::{LabInfoConfig, QueueConfig, S3LabInfoSource, SqsQueue};
use tops_core::{
    CoreError, Discovery, HeartbeatConfig, HeartbeatPublisher, IdentityAssigner, StateStore,
    TokioSleeper,
};
use tops_discover::{HttpMetadataClient, MetadataConfig};
use tops_model::QueueAddress;
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
        base_url: cli.metadata_url,
        ..Default::default()
    };
    metadata_cfg.validate().map_err(anyhow::Error::msg)?;

    let lab_cfg = LabInfoConfig {
        region: cli.bucket_region,
        endpoint_url: cli.aws_endpoint.clone(),
        ..LabInfoConfig::new(cli.bucket)
    };
    lab_cfg.validate().map_err(anyhow::Error::msg)?;

    let heartbeat_cfg = HeartbeatConfig {
        interval_ms: cli.heartbeat_interval_secs.saturating_mul(1_000),
        ..Default::default()
    };
    heartbeat_cfg.validate().map_err(anyhow::Error::msg)?;
    info!(
        "configured: metadata={}, bucket={}, state={}",
        metadata_cfg.base_url,
        lab_cfg.bucket,
        cli.state_file.display()
    );

    // 3) Discovery
    let metadata = HttpMetadataClient::new(&metadata_cfg).context("building metadata client")?;
    let lab_info = S3LabInfoSource::new(lab_cfg);
    let store = StateStore::new(cli.state_file);
    let assigner: IdentityAssigner = IdentityAssigner::default();

    let state = Discovery::new(&metadata, &lab_info, &store, &assigner)
        .run()
        .await?;
    info!(dep_id = %state.dep_id(), petname = %state.petname(), "deployment discovered");

    // 4) Heartbeat
    let address = QueueAddress {
        url: state.metadata.queue_url.clone(),
        region: state.metadata.queue_region.clone(),
    };
    let queue_cfg = QueueConfig {
        endpoint_url: cli.aws_endpoint,
    };
    let queue = SqsQueue::connect(&address, &state.metadata.credentials, &queue_cfg).await;

    let cancel = CancellationToken::new();
    signal::cancel_on_shutdown(cancel.clone());

    info!(interval_ms = heartbeat_cfg.interval_ms, "heartbeat loop running");
    HeartbeatPublisher::new(&queue, &TokioSleeper, heartbeat_cfg)
        .run(&state, &cancel)
        .await?;
    Ok(())
}
