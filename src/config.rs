//! Analyzer Configuration
//!
//! Read-only configuration snapshot for the pump, built once at startup
//! from environment variables. Re-reading configuration is modeled as
//! building a fresh snapshot, never mutating a shared one.

use std::env;
use tracing::warn;

use crate::classifier::WatchedTokenSet;
use crate::queue::{DEFAULT_ANALYZE_QUEUE, DEFAULT_BUY_QUEUE, DEFAULT_POP_TIMEOUT_SECS};

/// Default Redis connection string
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Configuration for the analyzer process
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Redis connection string
    pub redis_url: String,
    /// List name to consume notifications from
    pub analyze_queue: String,
    /// List name to forward opportunities to
    pub buy_queue: String,
    /// Comma-delimited SPL token addresses to watch
    pub spl_token_addresses: String,
    /// BRPOP timeout in seconds
    pub pop_timeout_secs: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            analyze_queue: DEFAULT_ANALYZE_QUEUE.to_string(),
            buy_queue: DEFAULT_BUY_QUEUE.to_string(),
            spl_token_addresses: String::new(),
            pop_timeout_secs: DEFAULT_POP_TIMEOUT_SECS,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration, overriding defaults from environment variables
    ///
    /// Recognized variables: `REDIS_URL`, `ANALYZE_QUEUE`, `BUY_QUEUE`,
    /// `SPL_TOKEN_ADDRESS`, `POP_TIMEOUT_SECS`. Anything else is ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(redis_url) = env::var("REDIS_URL") {
            config.redis_url = redis_url;
        }

        if let Ok(analyze_queue) = env::var("ANALYZE_QUEUE") {
            config.analyze_queue = analyze_queue;
        }

        if let Ok(buy_queue) = env::var("BUY_QUEUE") {
            config.buy_queue = buy_queue;
        }

        if let Ok(addresses) = env::var("SPL_TOKEN_ADDRESS") {
            config.spl_token_addresses = addresses;
        }

        if let Ok(raw) = env::var("POP_TIMEOUT_SECS") {
            match raw.parse::<f64>() {
                Ok(secs) if secs > 0.0 => config.pop_timeout_secs = secs,
                _ => warn!("Ignoring invalid POP_TIMEOUT_SECS value: {}", raw),
            }
        }

        config
    }

    /// Build the watched token set snapshot from the configured list
    pub fn watched_tokens(&self) -> WatchedTokenSet {
        WatchedTokenSet::parse(&self.spl_token_addresses)
    }
}
