//! IEX Cloud data provider.

pub mod client;
pub mod config;
pub mod response;

pub use client::IexCloudProvider;
pub use config::IexConfig;
pub use response::parse_batch_response;
