//! Queue Pump
//!
//! Owns the consume–classify–forward loop: pops raw messages from the
//! analyze queue, decodes and classifies each one, and forwards sandwich
//! opportunities verbatim to the buy queue. All per-message failure
//! isolation and cancellation handling lives here.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::classifier::{is_sandwich_opportunity, WatchedTokenSet};
use crate::decoder::decode_notification;
use crate::queue::{QueueClient, RawMessage};

/// Delay before retrying the queue after a transport error
pub const TRANSPORT_RETRY_DELAY_MS: u64 = 500;

/// Outcome of classifying a single raw message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Sandwich opportunity: forward the raw bytes to the buy queue
    Forward,
    /// Decoded fine but does not meet the opportunity criteria
    NotOpportunity,
    /// Payload could not be decoded; dropped after one attempt
    DecodeFailed(String),
}

/// Classify one raw queue message
///
/// Pure with respect to the queues: decodes the payload and applies the
/// opportunity predicate, mapping decode failures to a [`Verdict`] instead
/// of propagating them. One malformed message can never affect the
/// classification of the next.
pub fn classify_raw(raw: &[u8], tokens: &WatchedTokenSet) -> Verdict {
    match decode_notification(raw) {
        Ok(notification) => {
            if is_sandwich_opportunity(&notification, tokens) {
                Verdict::Forward
            } else {
                Verdict::NotOpportunity
            }
        }
        Err(err) => Verdict::DecodeFailed(err.to_string()),
    }
}

/// Single-worker pump draining the analyze queue
///
/// Holds the only handle to the queue connection for its lifetime. Keeps
/// no cross-iteration state that feeds back into processing; the counters
/// exist for shutdown logging only.
pub struct QueuePump {
    queue: QueueClient,
    tokens: WatchedTokenSet,
    processed: u64,
    forwarded: u64,
}

impl QueuePump {
    /// Create a new pump over an established queue client
    pub fn new(queue: QueueClient, tokens: WatchedTokenSet) -> Self {
        if tokens.is_empty() {
            warn!("Watched token set is empty; no message will ever be forwarded");
        }
        Self {
            queue,
            tokens,
            processed: 0,
            forwarded: 0,
        }
    }

    /// Number of messages popped and classified so far
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Number of messages forwarded to the buy queue so far
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Run the pump until the cancellation token fires
    ///
    /// The loop checks cancellation at the top of every iteration and
    /// while suspended in the bounded pop, so shutdown never waits on an
    /// empty queue and never leaves a half-classified message partially
    /// pushed. No error terminates the loop: transport failures are
    /// retried next iteration after a short delay, everything else is
    /// per-message and isolated in [`QueuePump::process_message`].
    pub async fn run(&mut self, cancel: CancellationToken) {
        info!(
            "Starting queue pump: {} -> {}",
            self.queue.analyze_queue(),
            self.queue.buy_queue()
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let popped = tokio::select! {
                _ = cancel.cancelled() => break,
                popped = self.queue.pop() => popped,
            };

            match popped {
                Ok(Some(raw)) => self.process_message(&raw).await,
                Ok(None) => debug!("No messages in analyze queue"),
                Err(err) => {
                    warn!(
                        "Failed to pop from analyze queue: {}, retrying in {}ms",
                        err, TRANSPORT_RETRY_DELAY_MS
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(Duration::from_millis(TRANSPORT_RETRY_DELAY_MS)) => {}
                    }
                }
            }
        }

        info!(
            "Queue pump stopped: {} processed, {} forwarded",
            self.processed, self.forwarded
        );
    }

    /// Process a single popped message through decode → classify → forward
    ///
    /// Never returns an error: every failure is logged here, at the
    /// iteration boundary, and the message is dropped.
    async fn process_message(&mut self, raw: &RawMessage) {
        self.processed += 1;

        match classify_raw(raw, &self.tokens) {
            Verdict::Forward => match self.queue.push(raw).await {
                Ok(()) => {
                    self.forwarded += 1;
                    info!(
                        "Sandwich opportunity forwarded to {} ({} bytes)",
                        self.queue.buy_queue(),
                        raw.len()
                    );
                }
                Err(err) => {
                    error!(
                        "Failed to push opportunity to {}: {}, message: {}",
                        self.queue.buy_queue(),
                        err,
                        String::from_utf8_lossy(raw)
                    );
                }
            },
            Verdict::NotOpportunity => debug!("Message is not a sandwich opportunity"),
            Verdict::DecodeFailed(reason) => {
                warn!(
                    "Dropping undecodable message: {}, payload: {}",
                    reason,
                    String::from_utf8_lossy(raw)
                );
            }
        }
    }
}
