use tops_model::StateDocument;
use tracing::{debug, info, warn};

use crate::{
    config::GateConfig, error::CoreError, ports::MetadataProvider, retry::Sleeper,
    store::StateStore,
};

/// Waits until the persisted document belongs to the live deployment.
///
/// A document whose `depID` differs from the metadata service's current
/// answer may be left over from an earlier deployment sharing the same disk
/// image; it is treated exactly like a missing file.
///
/// `max_wait` bounds elapsed time on the sleeper's clock, metadata round
/// trips included; no new attempt starts if the next pause would cross it.
pub struct StateGate<'a> {
    store: &'a StateStore,
    metadata: &'a dyn MetadataProvider,
    sleeper: &'a dyn Sleeper,
    config: GateConfig,
}

impl<'a> StateGate<'a> {
    pub fn new(
        store: &'a StateStore,
        metadata: &'a dyn MetadataProvider,
        sleeper: &'a dyn Sleeper,
        config: GateConfig,
    ) -> Self {
        Self {
            store,
            metadata,
            sleeper,
            config,
        }
    }

    pub async fn wait_for_current_state(&self) -> Result<StateDocument, CoreError> {
        let max_attempts = self.config.max_attempts.max(1);
        let delay = self.config.delay();
        let max_wait = self.config.max_wait();
        let started = self.sleeper.now();
        let mut attempt = 1;

        loop {
            if let Some(doc) = self.check().await {
                info!(attempt, dep_id = doc.dep_id().unwrap_or_default(), "current state found");
                return Ok(doc);
            }
            let waited = self.sleeper.now().saturating_duration_since(started);
            if attempt >= max_attempts || waited + delay >= max_wait {
                warn!(attempt, waited_ms = waited.as_millis() as u64, path = %self.store.path().display(), "no current state");
                return Err(CoreError::NoCurrentState {
                    attempts: attempt,
                    waited,
                });
            }
            debug!(attempt, delay_ms = delay.as_millis() as u64, "state not ready, retrying");
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    /// One attempt: the stored document if and only if it is current.
    async fn check(&self) -> Option<StateDocument> {
        let doc: StateDocument = self.store.load()?;
        let stored = doc.dep_id()?.to_string();

        match self.metadata.deployment_id().await {
            Ok(live) if live == stored => Some(doc),
            Ok(live) => {
                info!(%stored, %live, "state file belongs to another deployment, ignoring");
                None
            }
            Err(e) => {
                warn!(error = %e, "cannot confirm deployment id");
                None
            }
        }
    }
}
