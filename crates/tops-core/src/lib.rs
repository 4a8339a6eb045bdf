mod config;
pub use config::{GateConfig, HeartbeatConfig};

mod error;
pub use error::{CoreError, Severity, StoreError, UpstreamError, ValidationError};

pub mod retry;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper, with_retry};

mod ports;
pub use ports::{LabInfoSource, MetadataProvider, QueuePublisher};

pub mod store;
pub use store::StateStore;

pub mod identity;
pub use identity::{Assignment, IdentityAssigner, NameGenerator, PetnameGenerator};

mod discovery;
pub use discovery::Discovery;

pub mod heartbeat;
pub use heartbeat::{HeartbeatPublisher, HeartbeatState};

mod gate;
pub use gate::StateGate;

mod validate;
pub use validate::{InfoSnapshot, validate};
