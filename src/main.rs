//! Funding Monitor Entry Point
//!
//! 1. Loads `.env`, logging and `config.yaml` (or `CONFIG_PATH`)
//! 2. Builds the Hyperliquid and Paradex sources
//! 3. Runs the hourly scheduler until Ctrl+C

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};

use funding_arb::adapters::{HyperliquidAdapter, ParadexAdapter};
use funding_arb::config;
use funding_arb::core::{supervise, Scheduler};
use funding_arb::notify::{JsonFileSubscriberStore, TelegramNotifier};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    config::init_logging();

    info!("🚀 Funding monitor starting...");

    let config_path = std::env::var("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yaml"));
    let config = config::load_config_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let token = config::telegram_token()?;
    let timeout = config.pipeline.request_timeout();

    info!(
        hyperliquid = %config.hyperliquid.api_url(),
        paradex = %config.paradex.rest_base_url(),
        subscribers = %config.subscribers.path.display(),
        batch_size = config.pipeline.batch_size,
        report_size = config.pipeline.report_size,
        "[CONFIG] Loaded"
    );

    let scheduler = Scheduler::new(
        Arc::new(HyperliquidAdapter::new(config.hyperliquid.clone(), timeout)),
        Arc::new(ParadexAdapter::new(config.paradex.clone(), timeout)),
        Arc::new(JsonFileSubscriberStore::new(config.subscribers.path.clone())),
        Arc::new(TelegramNotifier::new(config.telegram.api_url.clone(), token, timeout)),
        config.pipeline.clone(),
    );

    let task = tokio::spawn(scheduler.run());

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("[SHUTDOWN] Ctrl+C received"),
            Err(err) => {
                error!(error = %err, "Failed to listen for Ctrl+C signal");
                std::future::pending::<()>().await;
            }
        }
    };

    // A dead scheduler ends the process with a non-zero exit code
    supervise(task, shutdown).await?;
    info!("[SHUTDOWN] Clean exit");
    Ok(())
}
