//! UDP Packet Probe
//!
//! A UDP round-trip latency and packet-loss measurement tool. Sends a batch
//! of datagrams to a target, attributes aggregate "count + region"
//! acknowledgements to previously-sent packets, and reports per-region
//! latency distributions and loss rates.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod resolve;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{AttributedPacket, Config, RegionStats, Report, SendRecord};
pub use session::{Attributor, Collector, Phase, SendTimeLedger, Sender, Session, SessionState};
pub use stats::StatisticsAggregator;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_PACKET_COUNT: u32 = 100;
    pub const MAX_PACKET_COUNT: u32 = 100;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Upper bound on a single blocking receive; the effective bound is
    /// always the smaller of this and the remaining session deadline
    pub const PER_CALL_RECV_TIMEOUT: Duration = Duration::from_millis(250);

    /// Receive buffer size for inbound aggregate responses
    pub const RECV_BUFFER_SIZE: usize = 1024;

    /// Send failures logged individually before suppression kicks in
    pub const SEND_FAILURE_LOG_LIMIT: u32 = 5;
}
