//! Batched fetch executor
//!
//! Drives a `FundingRateSource` over its whole universe without
//! overwhelming the remote API:
//! - at most `batch_size` requests in flight, batches strictly sequential
//! - `batch_pause` between consecutive batches
//! - per-market retry: `max_attempts` tries, pause `k × retry_backoff`
//!   before try `k + 1`, every try bounded by `request_timeout`
//!
//! A market that exhausts its retries is dropped from the snapshot. Only a
//! failed universe listing, or every market failing, is reported as an
//! exchange outage.

use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::adapters::{ExchangeError, ExchangeResult, FundingRateSource, FundingWindow, SymbolRate};
use crate::config::PipelineConfig;
use crate::core::types::ExchangeSnapshot;

/// Per-run counters, logged once the snapshot is complete
#[derive(Debug, Default)]
struct FetchStats {
    markets: usize,
    fetched: usize,
    absent: usize,
    failed: usize,
    duplicates: usize,
}

/// Pause before the retry that follows `attempt`; grows linearly.
fn retry_backoff(config: &PipelineConfig, attempt: u32) -> Duration {
    config.retry_backoff().saturating_mul(attempt)
}

/// Fetch one market, retrying transient failures.
///
/// `Ok(None)` (no data) is final and never retried.
pub async fn fetch_with_retry(
    source: &dyn FundingRateSource,
    market: &str,
    window: &FundingWindow,
    config: &PipelineConfig,
) -> ExchangeResult<Option<SymbolRate>> {
    let exchange = source.exchange_name();
    let mut last_error: Option<ExchangeError> = None;

    for attempt in 1..=config.max_attempts {
        let result = match tokio::time::timeout(
            config.request_timeout(),
            source.fetch_latest_rate(market, window),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ExchangeError::NetworkTimeout(config.request_timeout_ms)),
        };

        match result {
            Ok(rate) => {
                if attempt > 1 {
                    debug!(
                        exchange,
                        market,
                        attempt,
                        "Fetch succeeded after retry"
                    );
                }
                return Ok(rate);
            }
            Err(e) => {
                if attempt < config.max_attempts {
                    let backoff = retry_backoff(config, attempt);
                    debug!(
                        exchange,
                        market,
                        attempt,
                        error = %e,
                        retry_in_ms = backoff.as_millis() as u64,
                        "Fetch failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        ExchangeError::ConnectionFailed(format!("no attempt made for {}", market))
    }))
}

/// Build the snapshot for one exchange.
///
/// # Returns
/// * `Ok(ExchangeSnapshot)` - possibly partial
/// * `Err(ExchangeError::Outage)` - universe listing failed, or every
///   market failed after retries
pub async fn fetch_snapshot(
    source: &dyn FundingRateSource,
    config: &PipelineConfig,
) -> ExchangeResult<ExchangeSnapshot> {
    let exchange = source.exchange_name();
    let started = Instant::now();

    let markets = source
        .fetch_universe()
        .await
        .map_err(|e| ExchangeError::Outage {
            exchange: exchange.to_string(),
            reason: format!("universe listing failed: {}", e),
        })?;

    let window = FundingWindow::ending_at(Utc::now(), config.lookback());
    let batch_size = config.batch_size.max(1);
    let batch_count = markets.len().div_ceil(batch_size);

    let mut snapshot = ExchangeSnapshot::new(exchange);
    let mut stats = FetchStats {
        markets: markets.len(),
        ..Default::default()
    };

    for (index, batch) in markets.chunks(batch_size).enumerate() {
        let results = join_all(
            batch
                .iter()
                .map(|market| fetch_with_retry(source, market, &window, config)),
        )
        .await;

        for (market, result) in batch.iter().zip(results) {
            match result {
                Ok(Some(rate)) => {
                    stats.fetched += 1;
                    let symbol = rate.symbol.clone();
                    if !snapshot.insert(rate) {
                        stats.duplicates += 1;
                        debug!(exchange, market = %market, symbol = %symbol, "Duplicate symbol, keeping first");
                    }
                }
                Ok(None) => stats.absent += 1,
                Err(e) => {
                    stats.failed += 1;
                    warn!(
                        exchange,
                        market = %market,
                        attempts = config.max_attempts,
                        error = %e,
                        "Market dropped after retries"
                    );
                }
            }
        }

        if index + 1 < batch_count {
            tokio::time::sleep(config.batch_pause()).await;
        }
    }

    if stats.markets > 0 && stats.failed == stats.markets {
        return Err(ExchangeError::Outage {
            exchange: exchange.to_string(),
            reason: format!("all {} markets failed", stats.markets),
        });
    }

    info!(
        exchange,
        markets = stats.markets,
        fetched = stats.fetched,
        absent = stats.absent,
        failed = stats.failed,
        duplicates = stats.duplicates,
        symbols = snapshot.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Snapshot complete"
    );

    Ok(snapshot)
}

// =============================================================================
// Tests
// =============================================================================
