mod credentials;
pub use credentials::Credentials;

mod keys;
pub use keys::*;

mod lab_info;
pub use lab_info::LabInfo;

mod metadata;
pub use metadata::DeploymentMetadata;

mod queue;
pub use queue::QueueAddress;

mod state;
pub use state::{DeploymentState, StateDocument};

/// Opaque identifier of one live deployment instance.
pub type DepId = String;

/// Identifier selecting a lab-configuration document.
pub type LabId = String;

/// JSON object as persisted on disk and served by the info facade.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
