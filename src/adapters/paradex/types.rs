//! Paradex Types
//!
//! API response types for Paradex public REST endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{canonical_symbol, parse_rate, timestamp_from_ms, SymbolRate};

// =============================================================================
// Markets (GET /markets)
// =============================================================================

/// Single market entry from GET /markets
#[derive(Debug, Clone, Deserialize)]
pub struct ParadexMarket {
    /// Market symbol (e.g. "BTC-USD-PERP")
    pub symbol: String,
    /// Market kind ("PERP", "PERP_OPTION", ...), absent on older payloads
    #[serde(default)]
    pub asset_kind: Option<String>,
}

impl ParadexMarket {
    /// Whether this market is a perpetual future
    pub fn is_perpetual(&self) -> bool {
        match &self.asset_kind {
            Some(kind) => kind == "PERP",
            None => self.symbol.ends_with("-PERP"),
        }
    }
}

/// Response of GET /markets
#[derive(Debug, Clone, Deserialize)]
pub struct ParadexMarketsResponse {
    #[serde(default)]
    pub results: Vec<ParadexMarket>,
}

impl ParadexMarketsResponse {
    /// Symbols of all perpetual markets
    pub fn perpetual_symbols(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|m| m.is_perpetual())
            .map(|m| m.symbol.clone())
            .collect()
    }
}

// =============================================================================
// Funding (GET /funding/data)
// =============================================================================

/// Single funding data point, newest first in the response
#[derive(Debug, Clone, Deserialize)]
pub struct ParadexFundingData {
    /// Market symbol (e.g. "BTC-USD-PERP")
    pub market: String,
    /// Funding rate as string fraction
    pub funding_rate: String,
    /// Creation time in milliseconds
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// Response of GET /funding/data
#[derive(Debug, Clone, Deserialize)]
pub struct ParadexFundingResponse {
    #[serde(default)]
    pub results: Vec<ParadexFundingData>,
}

impl ParadexFundingResponse {
    /// Latest funding observation (first element), if any
    ///
    /// `fetched_at` stands in for the observation time when the payload
    /// carries no `created_at`.
    pub fn latest(&self, fetched_at: DateTime<Utc>) -> ExchangeResult<Option<SymbolRate>> {
        let Some(data) = self.results.first() else {
            return Ok(None);
        };
        let rate = parse_rate(&data.funding_rate)?;
        let observed_at = match data.created_at {
            Some(ms) => timestamp_from_ms(ms)?,
            None => fetched_at,
        };
        Ok(Some(SymbolRate::new(
            canonical_symbol(&data.market),
            rate,
            observed_at,
        )))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_markets_keep_only_perpetuals() {
        let json = r#"{
            "results": [
                {"symbol": "BTC-USD-PERP", "asset_kind": "PERP"},
                {"symbol": "BTC-USD-100000-C", "asset_kind": "PERP_OPTION"},
                {"symbol": "ETH-USD-PERP"}
            ]
        }"#;
        let markets: ParadexMarketsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            markets.perpetual_symbols(),
            vec!["BTC-USD-PERP", "ETH-USD-PERP"]
        );
    }

    #[test]
    fn test_funding_latest_is_first_and_normalized() {
        let json = r#"{
            "results": [
                {"market": "SOL-USD-PERP", "funding_rate": "0.0002", "funding_index": "1.0", "created_at": 1700003600000},
                {"market": "SOL-USD-PERP", "funding_rate": "0.0001", "funding_index": "0.9", "created_at": 1700003595000}
            ]
        }"#;
        let response: ParadexFundingResponse = serde_json::from_str(json).unwrap();
        let rate = response.latest(Utc::now()).unwrap().unwrap();
        assert_eq!(rate.symbol, "SOL");
        assert_eq!(rate.rate, 0.0002);
        assert_eq!(rate.observed_at.timestamp_millis(), 1_700_003_600_000);
    }

    #[test]
    fn test_funding_without_created_at_uses_fetch_time() {
        let fetched_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let json = r#"{"results": [{"market": "ETH-USD-PERP", "funding_rate": "-0.00005"}]}"#;
        let response: ParadexFundingResponse = serde_json::from_str(json).unwrap();
        let rate = response.latest(fetched_at).unwrap().unwrap();
        assert_eq!(rate.observed_at, fetched_at);
        assert_eq!(rate.rate, -0.00005);
    }

    #[test]
    fn test_funding_empty_results_is_absent() {
        let response: ParadexFundingResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(response.latest(Utc::now()).unwrap().is_none());

        let response: ParadexFundingResponse = serde_json::from_str("{}").unwrap();
        assert!(response.latest(Utc::now()).unwrap().is_none());
    }
}
