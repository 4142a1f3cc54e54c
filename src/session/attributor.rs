//! Aggregate response parsing and attribution

use crate::error::{AppError, Result};
use crate::logging::Logger;
use crate::models::AggregateResponse;
use crate::session::Session;
use std::sync::Arc;
use std::time::Instant;

/// Result of attributing one aggregate response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribution {
    /// Packets matched to this response
    pub attributed_count: u64,
    /// Claimed packets beyond what was outstanding
    pub excess_claimed: u64,
}

/// Parse an inbound datagram payload as `"<count> <region>"`.
///
/// Only the first space delimits; the region may itself contain spaces.
/// Malformed payloads (non-UTF-8, wrong arity, non-integer count, empty
/// region) are recoverable parse errors that mutate no state.
pub fn parse_response(payload: &[u8], arrived_at: Instant) -> Result<AggregateResponse> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| AppError::parse(format!("Response payload is not UTF-8: {}", e)))?;
    let text = text.trim();

    let (count_part, region) = text
        .split_once(' ')
        .ok_or_else(|| AppError::parse(format!("Expected '<count> <region>', got '{}'", text)))?;

    let claimed_count: u64 = count_part
        .parse()
        .map_err(|_| AppError::parse(format!("Response count is not a non-negative integer: '{}'", count_part)))?;

    if region.is_empty() {
        return Err(AppError::parse("Response region is empty"));
    }

    Ok(AggregateResponse::new(claimed_count, region.to_string(), arrived_at))
}

/// Converts decoded aggregate responses into per-packet latency records by
/// draining the session ledger FIFO, clamped to availability.
///
/// FIFO draining assumes send order approximates completion order. UDP does
/// not guarantee that; under reordering this misattributes latency to the
/// wrong logical packet while preserving aggregate counts. The wire carries
/// no sequence numbers, so this stays a documented best-effort heuristic.
pub struct Attributor {
    session: Arc<Session>,
    logger: Logger,
}

impl Attributor {
    /// Create a new attributor over a session
    pub fn new(session: Arc<Session>, logger: Logger) -> Self {
        Self { session, logger }
    }

    /// Attribute one decoded response against the session ledger.
    ///
    /// Over-claiming (the remote reports more delivered packets than are
    /// currently outstanding) is a warning, never an error; the clamp keeps
    /// the session invariants intact.
    pub fn attribute(&self, response: &AggregateResponse) -> Attribution {
        let attribution = self.session.attribute(response);

        if attribution.excess_claimed > 0 {
            self.logger
                .warn(&format!(
                    "Response from region '{}' claimed {} packets but only {} were outstanding",
                    response.region,
                    response.claimed_count,
                    attribution.attributed_count
                ))
                .field("region", &response.region)
                .field("claimed", response.claimed_count)
                .field("attributed", attribution.attributed_count)
                .log();
        }

        attribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SendRecord;
    use crate::session::Phase;
    use std::time::Duration;

    #[test]
    fn test_parse_valid_response() {
        let response = parse_response(b"7 us-west-2", Instant::now()).unwrap();
        assert_eq!(response.claimed_count, 7);
        assert_eq!(response.region, "us-west-2");
    }

    #[test]
    fn test_parse_region_with_spaces() {
        let response = parse_response(b"3 us west coast", Instant::now()).unwrap();
        assert_eq!(response.claimed_count, 3);
        assert_eq!(response.region, "us west coast");
    }

    #[test]
    fn test_parse_zero_count() {
        let response = parse_response(b"0 eu-central-1", Instant::now()).unwrap();
        assert_eq!(response.claimed_count, 0);
    }

    #[test]
    fn test_parse_trims_trailing_newline() {
        let response = parse_response(b"12 ap-south-1\n", Instant::now()).unwrap();
        assert_eq!(response.claimed_count, 12);
        assert_eq!(response.region, "ap-south-1");
    }

    #[test]
    fn test_parse_rejects_non_integer_count() {
        let err = parse_response(b"notanumber us-east-1", Instant::now()).unwrap_err();
        assert_eq!(err.category(), "PARSE");
    }

    #[test]
    fn test_parse_rejects_negative_count() {
        assert!(parse_response(b"-3 us-east-1", Instant::now()).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_region() {
        assert!(parse_response(b"42", Instant::now()).is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        assert!(parse_response(&[0xff, 0xfe, 0x20, 0x41], Instant::now()).is_err());
    }

    #[test]
    fn test_attribute_logs_and_clamps_excess() {
        let session = Arc::new(Session::new());
        session.advance(Phase::Sending);
        let base = Instant::now();
        for i in 1..=3 {
            session.record_send(SendRecord::new(i, base));
        }
        session.advance(Phase::Receiving);

        let attributor = Attributor::new(session.clone(), Logger::new("TEST".to_string()));
        let response = AggregateResponse::new(5, "us-west-2".to_string(), base + Duration::from_millis(20));

        let attribution = attributor.attribute(&response);
        assert_eq!(attribution.attributed_count, 3);
        assert_eq!(attribution.excess_claimed, 2);

        let state = session.snapshot();
        assert_eq!(state.total_attributed, 3);
        assert_eq!(state.total_excess_claimed, 2);
    }

    #[test]
    fn test_malformed_payload_mutates_nothing() {
        let session = Arc::new(Session::new());
        session.advance(Phase::Sending);
        session.record_send(SendRecord::new(1, Instant::now()));
        session.advance(Phase::Receiving);

        assert!(parse_response(b"garbage", Instant::now()).is_err());

        let state = session.snapshot();
        assert_eq!(state.total_attributed, 0);
        assert_eq!(state.total_responses, 0);
        assert_eq!(state.pending_sends.len(), 1);
    }
}
