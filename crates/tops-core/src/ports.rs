use async_trait::async_trait;
use tops_model::{Credentials, DepId, LabId, LabInfo};

use crate::error::UpstreamError;

/// Cloud metadata service.
///
/// Implementations apply their own retry budget; an `Err` means the budget
/// is spent. Answers are never cached.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn deployment_id(&self) -> Result<DepId, UpstreamError>;

    async fn lab_id(&self) -> Result<LabId, UpstreamError>;

    async fn credentials(&self) -> Result<Credentials, UpstreamError>;
}

/// Object store holding one lab-configuration document per lab id.
#[async_trait]
pub trait LabInfoSource: Send + Sync {
    async fn fetch_lab_info(
        &self,
        lab_id: &str,
        credentials: &Credentials,
    ) -> Result<LabInfo, UpstreamError>;
}

/// Queue bound to one heartbeat address.
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    /// Publish one message body and return the queue's message id.
    async fn publish(&self, body: &str) -> Result<String, UpstreamError>;
}
