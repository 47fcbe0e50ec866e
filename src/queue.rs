//! Redis Queue Client
//!
//! List-based work queue access: bounded blocking pop from the analyze
//! queue, push of verbatim raw bytes onto the buy queue. The connection is
//! long-lived and owned exclusively by the pump.

use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use thiserror::Error;

/// Default Redis list holding incoming log notifications
pub const DEFAULT_ANALYZE_QUEUE: &str = "solana_analyze_queue";

/// Default Redis list receiving flagged opportunities
pub const DEFAULT_BUY_QUEUE: &str = "solana_buy_queue";

/// Default BRPOP timeout in seconds
///
/// Bounds each pop so the loop wakes for cancellation checks without
/// busy-spinning on an empty queue.
pub const DEFAULT_POP_TIMEOUT_SECS: f64 = 1.0;

/// Opaque queue payload, forwarded byte-identical on a positive match
pub type RawMessage = Vec<u8>;

/// Errors that can occur talking to the queue broker
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),
}

/// Open a multiplexed Redis connection
///
/// # Arguments
/// * `redis_url` - Connection string, e.g. `redis://127.0.0.1:6379`
pub async fn connect(redis_url: &str) -> Result<MultiplexedConnection, QueueError> {
    let client = redis::Client::open(redis_url)?;
    Ok(client.get_multiplexed_async_connection().await?)
}

/// Redis list queue client for the analyze → buy handoff
pub struct QueueClient {
    connection: MultiplexedConnection,
    analyze_queue: String,
    buy_queue: String,
    pop_timeout_secs: f64,
}

impl QueueClient {
    /// Create a new queue client
    ///
    /// # Arguments
    /// * `connection` - An established Redis multiplexed connection
    /// * `analyze_queue` - List name to consume notifications from
    /// * `buy_queue` - List name to forward opportunities to
    /// * `pop_timeout_secs` - BRPOP timeout; 0 would block indefinitely
    pub fn new(
        connection: MultiplexedConnection,
        analyze_queue: impl Into<String>,
        buy_queue: impl Into<String>,
        pop_timeout_secs: f64,
    ) -> Self {
        Self {
            connection,
            analyze_queue: analyze_queue.into(),
            buy_queue: buy_queue.into(),
            pop_timeout_secs,
        }
    }

    /// Create a queue client with the default queue names and timeout
    pub fn with_defaults(connection: MultiplexedConnection) -> Self {
        Self::new(
            connection,
            DEFAULT_ANALYZE_QUEUE,
            DEFAULT_BUY_QUEUE,
            DEFAULT_POP_TIMEOUT_SECS,
        )
    }

    /// Pop one raw message from the tail of the analyze queue
    ///
    /// Blocks up to the configured timeout waiting for a message.
    ///
    /// # Returns
    /// `Ok(Some(raw))` with the message bytes, `Ok(None)` if the queue was
    /// empty for the whole timeout window.
    pub async fn pop(&mut self) -> Result<Option<RawMessage>, QueueError> {
        let reply: Option<(String, RawMessage)> = self
            .connection
            .brpop(&self.analyze_queue, self.pop_timeout_secs)
            .await?;
        Ok(reply.map(|(_key, raw)| raw))
    }

    /// Push raw message bytes onto the head of the buy queue
    ///
    /// The bytes are forwarded exactly as popped; the client never
    /// re-serializes.
    pub async fn push(&mut self, raw: &[u8]) -> Result<(), QueueError> {
        let _length: i64 = self.connection.lpush(&self.buy_queue, raw).await?;
        Ok(())
    }

    /// Get the analyze queue name
    pub fn analyze_queue(&self) -> &str {
        &self.analyze_queue
    }

    /// Get the buy queue name
    pub fn buy_queue(&self) -> &str {
        &self.buy_queue
    }

    /// Get the configured pop timeout in seconds
    pub fn pop_timeout_secs(&self) -> f64 {
        self.pop_timeout_secs
    }
}
