//! Statistics aggregation over a frozen probe session

use crate::models::{RegionStats, Report};
use crate::session::SessionState;
use chrono::Utc;
use std::collections::BTreeMap;

/// Groups attributed packets by region and produces the session report.
///
/// All statistics are population statistics: deterministic given the same
/// frozen state, so summarizing twice yields identical reports (up to the
/// generation timestamp).
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Summarize a frozen session state into a report.
    ///
    /// `packets_lost = successful_sends - total_attributed` is never
    /// negative: attribution is clamped to what was outstanding, so the
    /// attributed total can never exceed the successful sends. An empty
    /// attributed set yields an explicit no-data report with an undefined
    /// loss rate only when nothing was sent.
    pub fn summarize(state: &SessionState) -> Report {
        let mut by_region: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for packet in &state.attributed_packets {
            by_region
                .entry(packet.region.clone())
                .or_default()
                .push(packet.latency_ms);
        }

        let regions: BTreeMap<String, RegionStats> = by_region
            .into_iter()
            .filter_map(|(region, latencies)| {
                RegionStats::from_latencies(&latencies).map(|stats| (region, stats))
            })
            .collect();

        let packets_lost = u64::from(state.successful_sends).saturating_sub(state.total_attributed);
        let loss_rate = if state.successful_sends > 0 {
            Some(packets_lost as f64 / f64::from(state.successful_sends))
        } else {
            None
        };

        Report {
            attempted: state.attempted(),
            send_failures: state.send_failures,
            successful_sends: state.successful_sends,
            total_responses: state.total_responses,
            total_attributed: state.total_attributed,
            total_excess_claimed: state.total_excess_claimed,
            packets_lost,
            loss_rate,
            regions,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregateResponse, SendRecord};
    use crate::session::{Phase, Session};
    use std::time::{Duration, Instant};

    fn frozen_session(sends: u32, responses: &[(u64, &str, u64)]) -> SessionState {
        let session = Session::new();
        session.advance(Phase::Sending);
        let base = Instant::now();
        for i in 1..=sends {
            session.record_send(SendRecord::new(i, base));
        }
        session.advance(Phase::Receiving);
        for (claimed, region, offset_ms) in responses {
            session.attribute(&AggregateResponse::new(
                *claimed,
                region.to_string(),
                base + Duration::from_millis(*offset_ms),
            ));
        }
        session.freeze()
    }

    #[test]
    fn test_summarize_groups_by_region() {
        let state = frozen_session(10, &[(4, "us-west-2", 10), (3, "eu-west-1", 20)]);
        let report = StatisticsAggregator::summarize(&state);

        assert_eq!(report.regions.len(), 2);
        assert_eq!(report.regions["us-west-2"].count, 4);
        assert_eq!(report.regions["eu-west-1"].count, 3);
        assert_eq!(report.total_attributed, 7);
        assert_eq!(report.packets_lost, 3);
        assert_eq!(report.loss_rate, Some(0.3));

        // BTreeMap keeps region order sorted
        let names: Vec<&String> = report.regions.keys().collect();
        assert_eq!(names, vec!["eu-west-1", "us-west-2"]);
    }

    #[test]
    fn test_summarize_region_latency_bounds() {
        let state = frozen_session(5, &[(5, "ap-south-1", 40)]);
        let report = StatisticsAggregator::summarize(&state);

        let stats = &report.regions["ap-south-1"];
        assert_eq!(stats.count, 5);
        assert!(stats.min_ms <= stats.mean_ms);
        assert!(stats.mean_ms <= stats.max_ms);
        assert!(stats.min_ms > 0.0);
    }

    #[test]
    fn test_summarize_empty_state_is_no_data() {
        let state = frozen_session(10, &[]);
        let report = StatisticsAggregator::summarize(&state);

        assert!(!report.has_data());
        assert!(report.regions.is_empty());
        assert_eq!(report.total_attributed, 0);
        assert_eq!(report.packets_lost, 10);
        assert_eq!(report.loss_rate, Some(1.0));
    }

    #[test]
    fn test_summarize_nothing_sent_has_undefined_loss_rate() {
        let state = frozen_session(0, &[]);
        let report = StatisticsAggregator::summarize(&state);

        assert_eq!(report.successful_sends, 0);
        assert_eq!(report.packets_lost, 0);
        assert_eq!(report.loss_rate, None);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let state = frozen_session(10, &[(7, "us-west-2", 10), (5, "us-west-2", 25)]);

        let first = StatisticsAggregator::summarize(&state);
        let second = StatisticsAggregator::summarize(&state);

        assert_eq!(first.regions, second.regions);
        assert_eq!(first.packets_lost, second.packets_lost);
        assert_eq!(first.loss_rate, second.loss_rate);
        assert_eq!(first.total_excess_claimed, second.total_excess_claimed);
    }

    #[test]
    fn test_summarize_full_attribution_scenario() {
        // 10 sends; "7 us-west-2" then "5 us-west-2": clamp leaves no loss
        let state = frozen_session(10, &[(7, "us-west-2", 10), (5, "us-west-2", 25)]);
        let report = StatisticsAggregator::summarize(&state);

        assert_eq!(report.total_attributed, 10);
        assert_eq!(report.packets_lost, 0);
        assert_eq!(report.loss_rate, Some(0.0));
        assert_eq!(report.total_excess_claimed, 2);
        assert_eq!(report.regions["us-west-2"].count, 10);
    }
}
