//! Ordered ledger of pending send timestamps

use crate::models::SendRecord;
use std::collections::VecDeque;

/// Ordered, mutable record of pending send timestamps.
///
/// Appends happen during the send phase, drains during the receive phase.
/// FIFO: the earliest appended record is the earliest drained. The ledger is
/// not internally synchronized; all access goes through the session lock,
/// which makes a concurrent drain see each record removed exactly once.
#[derive(Debug, Clone, Default)]
pub struct SendTimeLedger {
    records: VecDeque<SendRecord>,
}

impl SendTimeLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger sized for an expected batch
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// Add a send record; callable only during the send phase
    pub fn append(&mut self, record: SendRecord) {
        self.records.push_back(record);
    }

    /// Atomically remove and return up to `k` earliest-appended records.
    ///
    /// Returns fewer than `k` when the ledger holds fewer; never blocks,
    /// never errors.
    pub fn drain_earliest(&mut self, k: usize) -> Vec<SendRecord> {
        let take = k.min(self.records.len());
        self.records.drain(..take).collect()
    }

    /// Number of pending records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
