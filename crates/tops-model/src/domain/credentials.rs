use std::fmt;

use serde::{Deserialize, Serialize};

/// Key/secret pair scoped to the deployment's cloud account.
///
/// `Debug` never prints the secret; the serialized form does, because the
/// state document and heartbeat carry it in plain text.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "awsKey")]
    pub key: String,
    #[serde(rename = "awsSecret")]
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}
