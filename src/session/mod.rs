//! Probe session state and the measurement core
//!
//! A session walks `Idle → Sending → Receiving → Summarized` exactly once.
//! The sender populates the ledger during the send phase, the collector
//! drains it through the attributor during the receive phase, and the frozen
//! state feeds the statistics aggregator.

pub mod attributor;
pub mod collector;
pub mod ledger;
pub mod sender;

pub use attributor::{Attribution, Attributor};
pub use collector::{CollectOutcome, Collector};
pub use ledger::SendTimeLedger;
pub use sender::{SendOutcome, Sender};

use crate::models::{AggregateResponse, AttributedPacket, SendRecord};
use chrono::Utc;
use std::sync::Mutex;

/// Session lifecycle phase; transitions are forward-only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Session created, nothing sent yet
    Idle,
    /// Send phase in progress
    Sending,
    /// Receive phase in progress
    Receiving,
    /// Terminal: state frozen, report can be generated
    Summarized,
}

/// Mutable state of one probe session.
///
/// All mutation happens under the session lock so that "read pending count,
/// drain k, update counters" is observed as one indivisible step.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Lifecycle phase
    pub phase: Phase,
    /// Pending send records awaiting attribution, FIFO
    pub pending_sends: SendTimeLedger,
    /// Packets fully transmitted
    pub successful_sends: u32,
    /// Packets that failed to transmit
    pub send_failures: u32,
    /// Aggregate responses accepted (valid parse)
    pub total_responses: u64,
    /// Packets attributed to a response so far
    pub total_attributed: u64,
    /// Claimed counts in excess of outstanding packets, summed
    pub total_excess_claimed: u64,
    /// Attributed packets, in attribution order
    pub attributed_packets: Vec<AttributedPacket>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            pending_sends: SendTimeLedger::new(),
            successful_sends: 0,
            send_failures: 0,
            total_responses: 0,
            total_attributed: 0,
            total_excess_claimed: 0,
            attributed_packets: Vec::new(),
        }
    }

    /// Packets attempted in total
    pub fn attempted(&self) -> u32 {
        self.successful_sends + self.send_failures
    }
}

/// Shared handle to a probe session.
///
/// The single lock covers the ledger, the counters, and the attributed set
/// together, so the core invariant `total_attributed ==
/// attributed_packets.len()` holds at every observable point, even if a
/// future variant runs multiple receive workers.
#[derive(Debug)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a new idle session
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.state.lock().expect("session lock poisoned").phase
    }

    /// Advance the lifecycle phase; backward transitions are ignored
    pub fn advance(&self, next: Phase) {
        let mut state = self.state.lock().expect("session lock poisoned");
        if next > state.phase {
            state.phase = next;
        }
    }

    /// Record one fully transmitted packet; send phase only
    pub fn record_send(&self, record: SendRecord) {
        let mut state = self.state.lock().expect("session lock poisoned");
        debug_assert_eq!(state.phase, Phase::Sending);
        state.pending_sends.append(record);
        state.successful_sends += 1;
    }

    /// Record one failed transmit attempt
    pub fn record_send_failure(&self) {
        let mut state = self.state.lock().expect("session lock poisoned");
        state.send_failures += 1;
    }

    /// Apply one valid aggregate response as a single transaction.
    ///
    /// Reads the pending length, clamps the claimed count to it, drains that
    /// many earliest records, converts each into an attributed packet, and
    /// bumps the counters, all under one lock scope.
    pub fn attribute(&self, response: &AggregateResponse) -> Attribution {
        let mut state = self.state.lock().expect("session lock poisoned");

        let pending = state.pending_sends.len() as u64;
        let attributed_count = response.claimed_count.min(pending);
        let excess_claimed = response.claimed_count - attributed_count;

        let drained = state.pending_sends.drain_earliest(attributed_count as usize);
        let received_at = Utc::now();
        for record in drained {
            let latency_ms = response
                .arrived_at
                .saturating_duration_since(record.sent_at)
                .as_secs_f64()
                * 1000.0;
            state.attributed_packets.push(AttributedPacket {
                region: response.region.clone(),
                latency_ms,
                received_at,
            });
        }

        state.total_attributed += attributed_count;
        state.total_responses += 1;
        state.total_excess_claimed += excess_claimed;

        debug_assert_eq!(state.total_attributed as usize, state.attributed_packets.len());

        Attribution {
            attributed_count,
            excess_claimed,
        }
    }

    /// Freeze the session and return a read-only snapshot of its state.
    ///
    /// Always fires once the receive phase ends, regardless of how it ended;
    /// summarization reads the snapshot, never the live session.
    pub fn freeze(&self) -> SessionState {
        let mut state = self.state.lock().expect("session lock poisoned");
        state.phase = Phase::Summarized;
        state.clone()
    }

    /// Snapshot the current state without freezing (for progress display)
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().expect("session lock poisoned").clone()
    }
}
