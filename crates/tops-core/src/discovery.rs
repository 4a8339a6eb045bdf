use tops_model::{DeploymentMetadata, DeploymentState, QueueAddress, StateDocument};
use tracing::{debug, info};

use crate::{
    error::CoreError,
    identity::{IdentityAssigner, NameGenerator},
    ports::{LabInfoSource, MetadataProvider},
    store::StateStore,
};

/// Writer-side startup: metadata, lab info, identity, persisted state.
pub struct Discovery<'a, G> {
    metadata: &'a dyn MetadataProvider,
    lab_info: &'a dyn LabInfoSource,
    store: &'a StateStore,
    assigner: &'a IdentityAssigner<G>,
}

impl<'a, G: NameGenerator> Discovery<'a, G> {
    pub fn new(
        metadata: &'a dyn MetadataProvider,
        lab_info: &'a dyn LabInfoSource,
        store: &'a StateStore,
        assigner: &'a IdentityAssigner<G>,
    ) -> Self {
        Self {
            metadata,
            lab_info,
            store,
            assigner,
        }
    }

    /// Build the current deployment state and persist it when it changed.
    ///
    /// The file is rewritten when a new petname was minted or when the
    /// composed document differs from the stored one.
    pub async fn run(&self) -> Result<DeploymentState, CoreError> {
        let dep_id = self.metadata.deployment_id().await.map_err(CoreError::Metadata)?;
        let lab_id = self.metadata.lab_id().await.map_err(CoreError::Metadata)?;
        let credentials = self.metadata.credentials().await.map_err(CoreError::Metadata)?;
        info!(%dep_id, %lab_id, key = %credentials.key, "metadata fetched");

        let labinfo = self
            .lab_info
            .fetch_lab_info(&lab_id, &credentials)
            .await
            .map_err(|source| CoreError::LabInfo {
                lab_id: lab_id.clone(),
                source,
            })?;
        let queue = QueueAddress::from_lab_info(&labinfo)?;
        info!(url = %queue.url, region = %queue.region, "heartbeat queue resolved");

        let previous: Option<StateDocument> = self.store.load();
        let assignment = self.assigner.assign(&dep_id, previous.as_ref());

        let state = DeploymentState {
            metadata: DeploymentMetadata {
                dep_id,
                lab_id,
                credentials,
                queue_url: queue.url,
                queue_region: queue.region,
                petname: assignment.petname,
            },
            labinfo,
        };

        let current = StateDocument::try_from(&state)?;
        if assignment.changed || previous.as_ref() != Some(&current) {
            self.store.save(&state)?;
            info!(path = %self.store.path().display(), petname = %state.petname(), "deployment state persisted");
        } else {
            debug!("deployment state unchanged");
        }
        Ok(state)
    }
}
