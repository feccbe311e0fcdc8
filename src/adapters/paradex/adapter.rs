//! Paradex Adapter Implementation
//!
//! REST adapter for Paradex funding rates. Unlike Hyperliquid, Paradex
//! exposes the latest funding snapshot per market directly, so the lookback
//! window is not needed for the query.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::FundingRateSource;
use crate::adapters::types::{create_http_client, FundingWindow, SymbolRate};

use super::config::ParadexConfig;
use super::types::{ParadexFundingResponse, ParadexMarketsResponse};

/// Paradex funding rate source
pub struct ParadexAdapter {
    config: ParadexConfig,
    http_client: reqwest::Client,
    timeout_ms: u64,
}

impl ParadexAdapter {
    /// Create a new ParadexAdapter with a per-request timeout
    pub fn new(config: ParadexConfig, request_timeout: Duration) -> Self {
        Self {
            config,
            http_client: create_http_client("paradex", request_timeout),
            timeout_ms: request_timeout.as_millis() as u64,
        }
    }

    /// GET a REST path with query parameters and decode the JSON answer
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.config.rest_base_url(), path);
        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ExchangeError::from_reqwest(e, self.timeout_ms))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_reqwest(e, self.timeout_ms))?;

        if !status.is_success() {
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ExchangeError::InvalidResponse(format!("Paradex {}: {} - body: {}", path, e, body)))
    }
}

// =============================================================================
// FundingRateSource Trait Implementation
// =============================================================================

#[async_trait]
impl FundingRateSource for ParadexAdapter {
    fn exchange_name(&self) -> &'static str {
        "paradex"
    }

    fn display_name(&self) -> &'static str {
        "Paradex"
    }

    async fn fetch_universe(&self) -> ExchangeResult<Vec<String>> {
        let markets: ParadexMarketsResponse = self.get_json("/markets", &[]).await?;
        let perpetuals = markets.perpetual_symbols();
        tracing::debug!(
            exchange = "paradex",
            listed = markets.results.len(),
            perpetuals = perpetuals.len(),
            "Universe fetched"
        );
        Ok(perpetuals)
    }

    async fn fetch_latest_rate(
        &self,
        market: &str,
        _window: &FundingWindow,
    ) -> ExchangeResult<Option<SymbolRate>> {
        let response: ParadexFundingResponse = self
            .get_json("/funding/data", &[("market", market)])
            .await?;
        response.latest(Utc::now())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> FundingWindow {
        FundingWindow::ending_at(Utc::now(), Duration::from_secs(3600))
    }

    fn adapter_for(server: &mockito::ServerGuard) -> ParadexAdapter {
        ParadexAdapter::new(
            ParadexConfig::with_api_url(format!("{}/v1", server.url())),
            Duration::from_secs(2),
        )
    }

    #[test]
    fn test_exchange_name() {
        let adapter = ParadexAdapter::new(ParadexConfig::default(), Duration::from_secs(1));
        assert_eq!(adapter.exchange_name(), "paradex");
        assert_eq!(adapter.display_name(), "Paradex");
    }

    #[tokio::test]
    async fn test_fetch_universe_perpetuals_only() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/markets")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results":[
                    {"symbol":"BTC-USD-PERP","asset_kind":"PERP"},
                    {"symbol":"ETH-USD-3000-P","asset_kind":"PERP_OPTION"},
                    {"symbol":"SOL-USD-PERP","asset_kind":"PERP"}
                ]}"#,
            )
            .create_async()
            .await;

        let adapter = adapter_for(&server);
        let universe = adapter.fetch_universe().await.unwrap();
        assert_eq!(universe, vec!["BTC-USD-PERP", "SOL-USD-PERP"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_latest_rate_queries_market() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/funding/data")
            .match_query(mockito::Matcher::UrlEncoded(
                "market".into(),
                "BTC-USD-PERP".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"results":[{"market":"BTC-USD-PERP","funding_rate":"0.0004","created_at":1700003600000}]}"#,
            )
            .create_async()
            .await;

        let adapter = adapter_for(&server);
        let rate = adapter
            .fetch_latest_rate("BTC-USD-PERP", &window())
            .await
            .unwrap()
            .expect("rate should be present");
        assert_eq!(rate.symbol, "BTC");
        assert_eq!(rate.rate, 0.0004);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_results_is_absent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/funding/data")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results":[]}"#)
            .create_async()
            .await;

        let adapter = adapter_for(&server);
        let rate = adapter.fetch_latest_rate("DOGE-USD-PERP", &window()).await.unwrap();
        assert!(rate.is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/markets")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let adapter = adapter_for(&server);
        let result = adapter.fetch_universe().await;
        assert!(
            matches!(result, Err(ExchangeError::Api { status: 503, .. })),
            "Got: {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_failure() {
        let adapter = ParadexAdapter::new(
            ParadexConfig::with_api_url("http://127.0.0.1:1/v1"),
            Duration::from_secs(2),
        );
        let result = adapter.fetch_universe().await;
        assert!(result.is_err());
    }
}
