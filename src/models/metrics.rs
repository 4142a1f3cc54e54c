//! Probe records and report data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Record of one successfully transmitted probe packet.
///
/// Created by the sender on full transmission, consumed exactly once by the
/// attributor when an aggregate response drains it from the ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendRecord {
    /// 1-based sequence number of the packet within the batch
    pub sequence: u32,

    /// Timestamp taken immediately before the transmit call, so socket-call
    /// latency is included in the measurement
    pub sent_at: Instant,
}

impl SendRecord {
    /// Create a new send record
    pub fn new(sequence: u32, sent_at: Instant) -> Self {
        Self { sequence, sent_at }
    }
}

/// One decoded aggregate acknowledgement, parsed from a single inbound
/// datagram and discarded after processing.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResponse {
    /// Number of packets the remote side claims to have received
    pub claimed_count: u64,

    /// Region label reported by the remote endpoint
    pub region: String,

    /// When the datagram arrived locally
    pub arrived_at: Instant,
}

impl AggregateResponse {
    /// Create a new aggregate response
    pub fn new(claimed_count: u64, region: String, arrived_at: Instant) -> Self {
        Self {
            claimed_count,
            region,
            arrived_at,
        }
    }
}

/// One probe packet successfully matched to an aggregate response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedPacket {
    /// Region the response that consumed this packet was tagged with
    pub region: String,

    /// Round-trip latency in milliseconds
    pub latency_ms: f64,

    /// Wall-clock time the matching response was received
    pub received_at: DateTime<Utc>,
}

/// Per-region latency statistics over attributed packets.
///
/// Population statistics, deterministic given the same input set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    /// Number of packets attributed to this region
    pub count: usize,

    /// Minimum latency (milliseconds)
    pub min_ms: f64,

    /// Maximum latency (milliseconds)
    pub max_ms: f64,

    /// Mean latency (milliseconds)
    pub mean_ms: f64,
}

impl RegionStats {
    /// Calculate statistics from a set of latency samples.
    ///
    /// Returns `None` for an empty sample set; callers surface that as an
    /// absent region rather than a zeroed row.
    pub fn from_latencies(latencies: &[f64]) -> Option<Self> {
        if latencies.is_empty() {
            return None;
        }

        let count = latencies.len();
        let min = latencies.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = latencies.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = latencies.iter().sum();

        Some(Self {
            count,
            min_ms: min,
            max_ms: max,
            mean_ms: sum / count as f64,
        })
    }
}

/// Structured summary of one probe session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Number of packets the session attempted to send
    pub attempted: u32,

    /// Number of transmit failures
    pub send_failures: u32,

    /// Number of packets fully transmitted
    pub successful_sends: u32,

    /// Number of aggregate responses accepted (valid parse)
    pub total_responses: u64,

    /// Number of packets attributed to a response
    pub total_attributed: u64,

    /// Claimed counts in excess of outstanding packets, summed over responses
    pub total_excess_claimed: u64,

    /// Packets never attributed to any response
    pub packets_lost: u64,

    /// `packets_lost / successful_sends`, undefined when nothing was sent
    pub loss_rate: Option<f64>,

    /// Per-region latency statistics, sorted by region name
    pub regions: BTreeMap<String, RegionStats>,

    /// When this report was generated
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Check whether the session produced any latency data
    pub fn has_data(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Total packets attributed across all regions
    pub fn attributed_by_region(&self) -> u64 {
        self.regions.values().map(|s| s.count as u64).sum()
    }

    /// Loss rate as a percentage, when defined
    pub fn loss_percentage(&self) -> Option<f64> {
        self.loss_rate.map(|r| r * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_stats_from_latencies() {
        let stats = RegionStats::from_latencies(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_ms, 10.0);
        assert_eq!(stats.max_ms, 30.0);
        assert_eq!(stats.mean_ms, 20.0);
    }

    #[test]
    fn test_region_stats_single_sample() {
        let stats = RegionStats::from_latencies(&[42.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.min_ms, 42.5);
        assert_eq!(stats.max_ms, 42.5);
        assert_eq!(stats.mean_ms, 42.5);
    }

    #[test]
    fn test_region_stats_empty() {
        assert!(RegionStats::from_latencies(&[]).is_none());
    }

    #[test]
    fn test_send_record_ordering_by_creation() {
        let first = SendRecord::new(1, Instant::now());
        let second = SendRecord::new(2, Instant::now());
        assert!(second.sent_at >= first.sent_at);
    }

    #[test]
    fn test_report_helpers() {
        let mut regions = BTreeMap::new();
        regions.insert(
            "us-west-2".to_string(),
            RegionStats {
                count: 7,
                min_ms: 1.0,
                max_ms: 9.0,
                mean_ms: 4.0,
            },
        );

        let report = Report {
            attempted: 10,
            send_failures: 0,
            successful_sends: 10,
            total_responses: 1,
            total_attributed: 7,
            total_excess_claimed: 0,
            packets_lost: 3,
            loss_rate: Some(0.3),
            regions,
            generated_at: Utc::now(),
        };

        assert!(report.has_data());
        assert_eq!(report.attributed_by_region(), 7);
        assert_eq!(report.loss_percentage(), Some(30.0));
    }

    #[test]
    fn test_report_serialization_round_trip() {
        let report = Report {
            attempted: 5,
            send_failures: 1,
            successful_sends: 4,
            total_responses: 0,
            total_attributed: 0,
            total_excess_claimed: 0,
            packets_lost: 4,
            loss_rate: Some(1.0),
            regions: BTreeMap::new(),
            generated_at: Utc::now(),
        };

        let json = serde_json::to_string(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(!parsed.has_data());
    }
}
