//! Data models and structures for the UDP packet probe

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{AggregateResponse, AttributedPacket, RegionStats, Report, SendRecord};
