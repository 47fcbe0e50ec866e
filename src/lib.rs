//! Sandoscope Analyzer Library
//!
//! This crate provides components for draining Solana log notifications
//! from a Redis work queue, classifying sandwich opportunities, and
//! forwarding qualifying messages to the buy queue.

pub mod classifier;
pub mod config;
pub mod decoder;
pub mod pump;
pub mod queue;

// Re-export commonly used types
pub use classifier::{is_sandwich_opportunity, WatchedTokenSet};
pub use config::AnalyzerConfig;
pub use decoder::{decode_notification, LogsNotification};
pub use pump::{classify_raw, QueuePump, Verdict};
pub use queue::{QueueClient, RawMessage};
