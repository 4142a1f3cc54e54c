//! Batch datagram sender

use crate::logging::Logger;
use crate::models::SendRecord;
use crate::session::Session;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::UdpSocket;

/// Outcome of one send batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOutcome {
    /// Packets the batch attempted to send
    pub attempted: u32,
    /// Packets fully transmitted
    pub successful: u32,
    /// Packets that failed to transmit
    pub failed: u32,
}

/// Emits a batch of probe packets and records a send timestamp per
/// successful transmission into the session ledger.
pub struct Sender {
    socket: Arc<UdpSocket>,
    session: Arc<Session>,
    logger: Logger,
}

impl Sender {
    /// Create a new sender over an already-bound socket
    pub fn new(socket: Arc<UdpSocket>, session: Arc<Session>, logger: Logger) -> Self {
        Self {
            socket,
            session,
            logger,
        }
    }

    /// Send `count` probe packets to `destination`.
    ///
    /// The timestamp is taken immediately before the transmit call so
    /// socket-call latency stays inside the measurement. A failed or partial
    /// transmit is counted and the loop continues; a single failure never
    /// aborts the batch. No retries. Failure logs are suppressed after a
    /// small threshold to avoid flooding.
    pub async fn send_all(&self, destination: SocketAddr, count: u32) -> SendOutcome {
        let mut successful = 0u32;
        let mut failed = 0u32;
        let log_limit = crate::defaults::SEND_FAILURE_LOG_LIMIT;

        for sequence in 1..=count {
            // Unique token per packet for external debuggability only;
            // attribution relies purely on arrival order and count.
            let payload = format!("probe_{}", sequence);
            let sent_at = Instant::now();

            match self.socket.send_to(payload.as_bytes(), destination).await {
                Ok(n) if n == payload.len() => {
                    self.session.record_send(SendRecord::new(sequence, sent_at));
                    successful += 1;
                }
                Ok(n) => {
                    self.session.record_send_failure();
                    failed += 1;
                    if failed <= log_limit {
                        self.logger
                            .warn(&format!("Partial transmit of packet {}: {} of {} bytes", sequence, n, payload.len()))
                            .field("sequence", sequence)
                            .log();
                    }
                }
                Err(e) => {
                    self.session.record_send_failure();
                    failed += 1;
                    if failed <= log_limit {
                        self.logger
                            .warn(&format!("Failed to send packet {}: {}", sequence, e))
                            .field("sequence", sequence)
                            .log();
                    }
                }
            }

            if failed == log_limit + 1 {
                self.logger
                    .warn(&format!("More than {} send failures; suppressing further send failure logs", log_limit))
                    .log();
            }
        }

        self.logger
            .info(&format!("Sent {} of {} packets to {}", successful, count, destination))
            .field("successful", successful)
            .field("failed", failed)
            .log();

        SendOutcome {
            attempted: count,
            successful,
            failed,
        }
    }
}
