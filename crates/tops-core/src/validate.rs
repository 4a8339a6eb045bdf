use tops_model::{JsonMap, StateDocument};

use crate::error::ValidationError;

/// Validated, read-only view served by the info facade.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSnapshot {
    pub metadata: JsonMap,
    pub labinfo: JsonMap,
    pub petname: String,
}

/// Last gate before state is exposed externally.
pub fn validate(doc: StateDocument) -> Result<InfoSnapshot, ValidationError> {
    if doc.metadata.is_empty() {
        return Err(ValidationError::MissingMetadata);
    }
    if doc.labinfo.is_empty() {
        return Err(ValidationError::MissingLabInfo);
    }
    let petname = doc
        .petname()
        .ok_or(ValidationError::MissingPetname)?
        .to_string();

    Ok(InfoSnapshot {
        metadata: doc.metadata,
        labinfo: doc.labinfo,
        petname,
    })
}
