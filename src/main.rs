//! Sandoscope Analyzer
//!
//! Binary entry point: loads configuration from the environment, connects
//! to Redis, and runs the queue pump until interrupted.

use anyhow::{Context, Result};
use dotenv::dotenv;
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sandoscope_analyzer::config::AnalyzerConfig;
use sandoscope_analyzer::pump::QueuePump;
use sandoscope_analyzer::queue::{self, QueueClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    info!("Starting Sandoscope Analyzer");

    let config = AnalyzerConfig::from_env();
    let tokens = config.watched_tokens();
    info!("Watching {} SPL token address(es)", tokens.len());

    let connection = queue::connect(&config.redis_url)
        .await
        .with_context(|| format!("connecting to Redis at {}", config.redis_url))?;
    let client = QueueClient::new(
        connection,
        config.analyze_queue,
        config.buy_queue,
        config.pop_timeout_secs,
    );

    // Cancel the pump on ctrl-c; the loop finishes its current iteration
    // and stops cleanly.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    let mut pump = QueuePump::new(client, tokens);
    pump.run(cancel).await;

    Ok(())
}
