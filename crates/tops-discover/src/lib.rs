mod client;
pub use client::HttpMetadataClient;

mod config;
pub use config::MetadataConfig;

mod errors;
pub use errors::DiscoverError;
