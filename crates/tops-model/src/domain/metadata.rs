use serde::{Deserialize, Serialize};

use crate::{Credentials, DepId, LabId};

/// Identity and addressing of one deployment, as persisted and published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentMetadata {
    #[serde(rename = "depID")]
    pub dep_id: DepId,
    #[serde(rename = "labID")]
    pub lab_id: LabId,
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(rename = "sqsURL")]
    pub queue_url: String,
    #[serde(rename = "sqsRegion")]
    pub queue_region: String,
    pub petname: String,
}
