//! Core data types for funding rate sources
//!
//! These types are shared by every exchange adapter so that the fetch
//! executor and the detector never see exchange-specific shapes.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::errors::{ExchangeError, ExchangeResult};

// =============================================================================
// Symbol Rate
// =============================================================================

/// Latest funding observation for one symbol on one exchange.
///
/// `rate` is the raw fraction per funding interval (`0.0001` = 0.01%).
/// Conversion to percent only happens in the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRate {
    /// Canonical base asset (e.g. "BTC")
    pub symbol: String,
    /// Funding rate as a plain fraction
    pub rate: f64,
    /// Time of the funding observation
    pub observed_at: DateTime<Utc>,
}

impl SymbolRate {
    pub fn new(symbol: impl Into<String>, rate: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            rate,
            observed_at,
        }
    }
}

// =============================================================================
// Funding Window
// =============================================================================

/// Lookback window used to find the most recent funding observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FundingWindow {
    /// Window of length `lookback` ending at `end`.
    ///
    /// A lookback reaching past the representable range starts at the
    /// earliest representable instant.
    pub fn ending_at(end: DateTime<Utc>, lookback: Duration) -> Self {
        let start = chrono::Duration::from_std(lookback)
            .ok()
            .and_then(|lookback| end.checked_sub_signed(lookback))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end }
    }

    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

// =============================================================================
// Normalization Helpers
// =============================================================================

/// Reduce an exchange ticker to its canonical base asset.
///
/// `BTC-USD-PERP` → `BTC`, `eth` → `ETH`.
pub fn canonical_symbol(ticker: &str) -> String {
    ticker
        .split('-')
        .next()
        .unwrap_or(ticker)
        .trim()
        .to_ascii_uppercase()
}

/// Parse a funding rate string into a finite fraction.
pub fn parse_rate(raw: &str) -> ExchangeResult<f64> {
    let rate = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ExchangeError::InvalidResponse(format!("Invalid funding rate '{}': {}", raw, e)))?;
    if !rate.is_finite() {
        return Err(ExchangeError::InvalidResponse(format!(
            "Non-finite funding rate '{}'",
            raw
        )));
    }
    Ok(rate)
}

/// Convert an exchange millisecond timestamp to UTC.
pub fn timestamp_from_ms(ms: i64) -> ExchangeResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| ExchangeError::InvalidResponse(format!("Invalid timestamp: {}", ms)))
}

// =============================================================================
// HTTP Client Constants
// =============================================================================

/// HTTP connection timeout (milliseconds) — fail fast if host unreachable
const HTTP_CONNECT_TIMEOUT_MS: u64 = 3000;
/// Max idle connections per host in connection pool
const HTTP_POOL_MAX_IDLE: usize = 5;
/// How long idle connections stay in the pool (seconds)
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 60;

/// Create the HTTP client used by one exchange adapter
///
/// Every request carries `request_timeout`, so a hung call surfaces as
/// `ExchangeError::NetworkTimeout` instead of stalling the cycle.
pub fn create_http_client(exchange_name: &str, request_timeout: Duration) -> reqwest::Client {
    let client = reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::info!(
        phase = "init",
        exchange = %exchange_name,
        timeout_ms = request_timeout.as_millis() as u64,
        connect_timeout_ms = HTTP_CONNECT_TIMEOUT_MS,
        pool_max_idle = HTTP_POOL_MAX_IDLE,
        "HTTP client configured"
    );
    client
}

// =============================================================================
// Tests
// =============================================================================
