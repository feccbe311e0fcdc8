//! Hyperliquid Adapter Implementation
//!
//! REST adapter for Hyperliquid funding rates via the public `/info`
//! endpoint. Funding is looked up per coin over a time range
//! (`fundingHistory`); the newest entry in the window wins.
//!
//! Docs: https://hyperliquid.gitbook.io/hyperliquid-docs/for-developers/api/info-endpoint

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::FundingRateSource;
use crate::adapters::types::{create_http_client, FundingWindow, SymbolRate};

use super::config::HyperliquidConfig;
use super::types::{latest_funding, HyperliquidFundingEntry, HyperliquidMeta, InfoRequest};

// =============================================================================
// HyperliquidAdapter
// =============================================================================

/// Hyperliquid funding rate source
pub struct HyperliquidAdapter {
    config: HyperliquidConfig,
    http_client: reqwest::Client,
    timeout_ms: u64,
}

impl HyperliquidAdapter {
    /// Create a new HyperliquidAdapter with a per-request timeout
    pub fn new(config: HyperliquidConfig, request_timeout: Duration) -> Self {
        Self {
            config,
            http_client: create_http_client("hyperliquid", request_timeout),
            timeout_ms: request_timeout.as_millis() as u64,
        }
    }

    /// POST a query to `/info` and decode the JSON answer
    async fn post_info<T: DeserializeOwned>(&self, request: &InfoRequest<'_>) -> ExchangeResult<T> {
        let response = self
            .http_client
            .post(self.config.info_url())
            .json(request)
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

        serde_json::from_str(&body).map_err(|e| {
            ExchangeError::InvalidResponse(format!("Hyperliquid: {} - body: {}", e, body))
        })
    }
}

// =============================================================================
// FundingRateSource Implementation
// =============================================================================

#[async_trait]
impl FundingRateSource for HyperliquidAdapter {
    fn exchange_name(&self) -> &'static str {
        "hyperliquid"
    }

    fn display_name(&self) -> &'static str {
        "Hyperliquid"
    }

    async fn fetch_universe(&self) -> ExchangeResult<Vec<String>> {
        let meta: HyperliquidMeta = self.post_info(&InfoRequest::Meta).await?;
        let coins = meta.active_coins();
        tracing::debug!(
            exchange = "hyperliquid",
            listed = meta.universe.len(),
            active = coins.len(),
            "Universe fetched"
        );
        Ok(coins)
    }

    async fn fetch_latest_rate(
        &self,
        market: &str,
        window: &FundingWindow,
    ) -> ExchangeResult<Option<SymbolRate>> {
        let request = InfoRequest::FundingHistory {
            coin: market,
            start_time: window.start_ms(),
            end_time: window.end_ms(),
        };
        let entries: Vec<HyperliquidFundingEntry> = self.post_info(&request).await?;
        let latest = latest_funding(&entries)?;
        if latest.is_none() {
            tracing::trace!(exchange = "hyperliquid", coin = %market, "No funding in window");
        }
        Ok(latest)
    }
}

// =============================================================================
// Tests
// =============================================================================
