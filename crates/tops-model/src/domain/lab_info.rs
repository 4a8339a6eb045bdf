use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{JsonMap, KEY_QUEUE_URL, ModelError};

/// Lab-configuration mapping loaded from `{labID}.yaml`.
///
/// The schema belongs to the lab author; only `sqsURL` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabInfo(JsonMap);

impl LabInfo {
    pub fn new(map: JsonMap) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The heartbeat queue URL, when present as a non-empty string.
    pub fn queue_url(&self) -> Option<&str> {
        self.0
            .get(KEY_QUEUE_URL)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn as_map(&self) -> &JsonMap {
        &self.0
    }

    pub fn into_map(self) -> JsonMap {
        self.0
    }
}

impl TryFrom<Value> for LabInfo {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(ModelError::NotAMapping("null")),
            Value::Bool(_) => Err(ModelError::NotAMapping("bool")),
            Value::Number(_) => Err(ModelError::NotAMapping("number")),
            Value::String(_) => Err(ModelError::NotAMapping("string")),
            Value::Array(_) => Err(ModelError::NotAMapping("sequence")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn only_objects_become_lab_info() {
        assert!(LabInfo::try_from(json!({"sqsURL": "x"})).is_ok());
        assert_eq!(
            LabInfo::try_from(json!(["a"])).unwrap_err(),
            ModelError::NotAMapping("sequence")
        );
        assert_eq!(
            LabInfo::try_from(Value::Null).unwrap_err(),
            ModelError::NotAMapping("null")
        );
    }

    #[test]
    fn queue_url_ignores_blank_and_non_string() {
        let info = LabInfo::try_from(json!({"sqsURL": "  "})).unwrap();
        assert_eq!(info.queue_url(), None);

        let info = LabInfo::try_from(json!({"sqsURL": 42})).unwrap();
        assert_eq!(info.queue_url(), None);
    }
}
