//! Hyperliquid Types
//!
//! API request/response types for the Hyperliquid `/info` endpoint.
//!
//! Docs: https://hyperliquid.gitbook.io/hyperliquid-docs/for-developers/api/info-endpoint
//!
//! Funding history entries are ordered oldest → newest:
//!   [{ coin: "BTC", fundingRate: "0.0000125", premium: "...", time: 1700000000000 }]

use serde::{Deserialize, Serialize};

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{canonical_symbol, parse_rate, timestamp_from_ms, SymbolRate};

// =============================================================================
// Requests
// =============================================================================

/// Body of a POST /info request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub(crate) enum InfoRequest<'a> {
    /// Perpetuals metadata (universe)
    #[serde(rename = "meta")]
    Meta,
    /// Funding history for one coin over a time range
    #[serde(rename = "fundingHistory")]
    FundingHistory {
        coin: &'a str,
        #[serde(rename = "startTime")]
        start_time: i64,
        #[serde(rename = "endTime")]
        end_time: i64,
    },
}

// =============================================================================
// Responses
// =============================================================================

/// One entry in the perpetuals universe
#[derive(Debug, Clone, Deserialize)]
pub struct HyperliquidAsset {
    /// Coin name (e.g. "BTC")
    pub name: String,
    /// Present and true for delisted coins
    #[serde(default, rename = "isDelisted")]
    pub is_delisted: bool,
}

/// Response of `{"type": "meta"}`
#[derive(Debug, Clone, Deserialize)]
pub struct HyperliquidMeta {
    pub universe: Vec<HyperliquidAsset>,
}

impl HyperliquidMeta {
    /// Coins that are still tradable
    pub fn active_coins(&self) -> Vec<String> {
        self.universe
            .iter()
            .filter(|asset| !asset.is_delisted)
            .map(|asset| asset.name.clone())
            .collect()
    }
}

/// One funding history entry
#[derive(Debug, Clone, Deserialize)]
pub struct HyperliquidFundingEntry {
    pub coin: String,
    /// Funding rate as string fraction
    #[serde(rename = "fundingRate")]
    pub funding_rate: String,
    /// Timestamp in milliseconds
    pub time: i64,
}

impl HyperliquidFundingEntry {
    /// Convert to our canonical SymbolRate
    pub fn to_symbol_rate(&self) -> ExchangeResult<SymbolRate> {
        let rate = parse_rate(&self.funding_rate)?;
        let observed_at = timestamp_from_ms(self.time)?;
        Ok(SymbolRate::new(canonical_symbol(&self.coin), rate, observed_at))
    }
}

/// Pick the newest entry of a funding history (last element), if any.
pub fn latest_funding(entries: &[HyperliquidFundingEntry]) -> ExchangeResult<Option<SymbolRate>> {
    entries.last().map(|e| e.to_symbol_rate()).transpose()
}

// =============================================================================
// Tests
// =============================================================================
