//! Deadline-bounded response collection loop

use crate::logging::Logger;
use crate::session::attributor::{parse_response, Attributor};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Outcome of one receive phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectOutcome {
    /// Responses accepted (valid parse) and attributed
    pub responses_accepted: u64,
    /// Datagrams discarded as malformed
    pub parse_errors: u64,
    /// Whether a transport error ended the phase before the deadline
    pub ended_early: bool,
}

/// Runs the receive loop under a wall-clock deadline, handing each datagram
/// to the attributor.
pub struct Collector {
    socket: Arc<UdpSocket>,
    attributor: Attributor,
    logger: Logger,
}

impl Collector {
    /// Create a new collector over an already-bound socket
    pub fn new(socket: Arc<UdpSocket>, attributor: Attributor, logger: Logger) -> Self {
        Self {
            socket,
            attributor,
            logger,
        }
    }

    /// Collect responses until the deadline passes.
    ///
    /// Each blocking receive is bounded by `min(remaining, per-call cap)`,
    /// re-derived from the remaining deadline every iteration, so the total
    /// receive duration never meaningfully exceeds the requested timeout.
    /// A receive timeout with no data just re-checks the deadline. Any other
    /// transport error ends the phase early; whatever was attributed stands.
    /// Zero responses is a valid terminal state.
    pub async fn run(&self, deadline: std::time::Duration) -> CollectOutcome {
        let started = Instant::now();
        let mut outcome = CollectOutcome::default();
        let mut buf = [0u8; crate::defaults::RECV_BUFFER_SIZE];

        loop {
            let remaining = match deadline.checked_sub(started.elapsed()) {
                Some(remaining) if !remaining.is_zero() => remaining,
                _ => break,
            };
            let per_call = remaining.min(crate::defaults::PER_CALL_RECV_TIMEOUT);

            match timeout(per_call, self.socket.recv_from(&mut buf)).await {
                // Per-call timeout: loop around and re-check the deadline
                Err(_) => continue,
                Ok(Ok((len, peer))) => {
                    let arrived_at = Instant::now();
                    match parse_response(&buf[..len], arrived_at) {
                        Ok(response) => {
                            let attribution = self.attributor.attribute(&response);
                            outcome.responses_accepted += 1;
                            self.logger
                                .info(&format!(
                                    "Response from {}: '{} {}' attributed {} packet(s)",
                                    peer, response.claimed_count, response.region, attribution.attributed_count
                                ))
                                .field("peer", peer.to_string())
                                .field("claimed", response.claimed_count)
                                .field("attributed", attribution.attributed_count)
                                .log();
                        }
                        Err(e) => {
                            outcome.parse_errors += 1;
                            self.logger
                                .warn(&format!("Discarding malformed response from {}: {}", peer, e))
                                .error_info(&e)
                                .log();
                        }
                    }
                }
                Ok(Err(e)) => {
                    // Recoverable at the session level: end the phase early,
                    // keep everything attributed so far
                    outcome.ended_early = true;
                    self.logger
                        .error(&format!("Receive failed, ending collection early: {}", e))
                        .log();
                    break;
                }
            }
        }

        self.logger
            .info(&format!(
                "Collection finished: {} response(s), {} malformed",
                outcome.responses_accepted, outcome.parse_errors
            ))
            .field("elapsed_ms", started.elapsed().as_millis() as u64)
            .log();

        outcome
    }
}
