//! Field names of the persisted and published documents.

pub const KEY_METADATA: &str = "metadata";
pub const KEY_LABINFO: &str = "labinfo";

pub const KEY_DEP_ID: &str = "depID";
pub const KEY_LAB_ID: &str = "labID";
pub const KEY_PETNAME: &str = "petname";
pub const KEY_QUEUE_URL: &str = "sqsURL";
pub const KEY_QUEUE_REGION: &str = "sqsRegion";
