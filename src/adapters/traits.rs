//! Funding rate source trait definition
//!
//! The FundingRateSource trait defines the common interface that all
//! exchange adapters implement, hiding each exchange's request shapes
//! behind one normalized result type.

use async_trait::async_trait;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{FundingWindow, SymbolRate};

/// Common trait for all funding rate sources
///
/// Adapters are stateless apart from their HTTP client; the batched fetch
/// executor owns retries, pacing and timeouts.
///
/// # Example Implementation
///
/// ```ignore
/// use async_trait::async_trait;
///
/// struct StaticSource;
///
/// #[async_trait]
/// impl FundingRateSource for StaticSource {
///     fn exchange_name(&self) -> &'static str { "static" }
///     fn display_name(&self) -> &'static str { "Static" }
///     async fn fetch_universe(&self) -> ExchangeResult<Vec<String>> {
///         Ok(vec!["BTC".into()])
///     }
///     async fn fetch_latest_rate(&self, market: &str, _w: &FundingWindow)
///         -> ExchangeResult<Option<SymbolRate>> {
///         Ok(Some(SymbolRate::new(market, 0.0001, chrono::Utc::now())))
///     }
/// }
/// ```
#[async_trait]
pub trait FundingRateSource: Send + Sync {
    /// Lowercase identifier used in logs (e.g. "hyperliquid", "paradex")
    fn exchange_name(&self) -> &'static str;

    /// Human-facing label used in reports (e.g. "Hyperliquid")
    fn display_name(&self) -> &'static str;

    /// List exchange-native identifiers of every tradable perpetual market
    ///
    /// Delisted or inactive markets are excluded. An error here means the
    /// exchange is unusable for this cycle.
    async fn fetch_universe(&self) -> ExchangeResult<Vec<String>>;

    /// Fetch the most recent funding observation for one market
    ///
    /// # Arguments
    /// * `market` - Identifier as returned by `fetch_universe()`
    /// * `window` - Lookback bounding the search for the latest observation
    ///
    /// # Returns
    /// * `Ok(Some(SymbolRate))` - Observation found, symbol normalized
    /// * `Ok(None)` - Exchange has no data for this market
    /// * `Err(...)` - Transient failure, safe to retry
    async fn fetch_latest_rate(
        &self,
        market: &str,
        window: &FundingWindow,
    ) -> ExchangeResult<Option<SymbolRate>>;
}
