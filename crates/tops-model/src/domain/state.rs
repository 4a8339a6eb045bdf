use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DeploymentMetadata, JsonMap, KEY_DEP_ID, KEY_PETNAME, LabInfo, ModelError};

/// The single persisted document, as written by the lab service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentState {
    pub metadata: DeploymentMetadata,
    pub labinfo: LabInfo,
}

impl DeploymentState {
    pub fn dep_id(&self) -> &str {
        &self.metadata.dep_id
    }

    pub fn petname(&self) -> &str {
        &self.metadata.petname
    }
}

/// Untyped view of the persisted document.
///
/// Readers use this view so sub-documents are served exactly as stored,
/// including keys this crate does not know about. Missing sections
/// deserialize as empty maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    #[serde(default)]
    pub metadata: JsonMap,
    #[serde(default)]
    pub labinfo: JsonMap,
}

impl StateDocument {
    pub fn dep_id(&self) -> Option<&str> {
        self.str_field(KEY_DEP_ID)
    }

    pub fn petname(&self) -> Option<&str> {
        self.str_field(KEY_PETNAME)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl TryFrom<&DeploymentState> for StateDocument {
    type Error = ModelError;

    fn try_from(state: &DeploymentState) -> Result<Self, Self::Error> {
        match serde_json::to_value(&state.metadata) {
            Ok(Value::Object(metadata)) => Ok(Self {
                metadata,
                labinfo: state.labinfo.as_map().clone(),
            }),
            Ok(_) => Err(ModelError::Encode("metadata is not an object".into())),
            Err(e) => Err(ModelError::Encode(e.to_string())),
        }
    }
}
