//! Shared test utilities for funding rate source testing
//!
//! Provides a configurable `TestMockSource` used by the trait, fetcher and
//! scheduler test modules.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::FundingRateSource;
use crate::adapters::types::{canonical_symbol, FundingWindow, SymbolRate};

/// Scripted behaviour for one market
#[derive(Debug, Clone)]
pub enum MockMarket {
    /// Returns the rate immediately
    Rate(f64),
    /// Exchange reports no data
    Absent,
    /// Fails `n` times, then returns the rate
    FlakyThenRate(usize, f64),
    /// Fails on every attempt
    AlwaysFail,
    /// Never answers within any reasonable timeout
    Hang,
}

/// Unified mock funding source for tests
pub struct TestMockSource {
    /// Exchange name returned by `exchange_name()`
    pub name: &'static str,
    /// Label returned by `display_name()`
    pub display: &'static str,
    /// Markets in universe order
    pub markets: Vec<(String, MockMarket)>,
    /// When true, `fetch_universe` returns an error
    pub universe_fails: bool,
    /// Attempts per market (shared so tests can inspect after moving the source)
    pub attempts: Arc<Mutex<HashMap<String, usize>>>,
    /// Number of `fetch_universe()` calls
    pub universe_calls: Arc<AtomicUsize>,
    /// Simulated latency per rate request
    pub latency: Option<Duration>,
    /// Requests currently in flight
    pub in_flight: Arc<AtomicUsize>,
    /// Highest number of concurrent requests observed
    pub max_in_flight: Arc<AtomicUsize>,
}

impl TestMockSource {
    /// Create an empty mock source with the given exchange name
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            display: "Mock",
            markets: Vec::new(),
            universe_fails: false,
            attempts: Arc::new(Mutex::new(HashMap::new())),
            universe_calls: Arc::new(AtomicUsize::new(0)),
            latency: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_display(mut self, display: &'static str) -> Self {
        self.display = display;
        self
    }

    pub fn with_rate(self, market: &str, rate: f64) -> Self {
        self.with_market(market, MockMarket::Rate(rate))
    }

    pub fn with_absent(self, market: &str) -> Self {
        self.with_market(market, MockMarket::Absent)
    }

    pub fn with_market(mut self, market: &str, behaviour: MockMarket) -> Self {
        self.markets.push((market.to_string(), behaviour));
        self
    }

    /// Create a mock whose universe listing always fails
    pub fn with_outage(name: &'static str) -> Self {
        let mut mock = Self::new(name);
        mock.universe_fails = true;
        mock
    }

    /// Number of `fetch_latest_rate` calls made for `market`
    pub fn attempts_for(&self, market: &str) -> usize {
        self.attempts
            .lock()
            .map(|a| a.get(market).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl FundingRateSource for TestMockSource {
    fn exchange_name(&self) -> &'static str {
        self.name
    }

    fn display_name(&self) -> &'static str {
        self.display
    }

    async fn fetch_universe(&self) -> ExchangeResult<Vec<String>> {
        self.universe_calls.fetch_add(1, Ordering::Relaxed);
        if self.universe_fails {
            return Err(ExchangeError::ConnectionFailed("mock universe down".into()));
        }
        Ok(self.markets.iter().map(|(m, _)| m.clone()).collect())
    }

    async fn fetch_latest_rate(
        &self,
        market: &str,
        window: &FundingWindow,
    ) -> ExchangeResult<Option<SymbolRate>> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(market.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let behaviour = self
            .markets
            .iter()
            .find(|(m, _)| m == market)
            .map(|(_, b)| b.clone())
            .unwrap_or(MockMarket::Absent);

        let observed_at = window.end.min(Utc::now());
        match behaviour {
            MockMarket::Rate(rate) => Ok(Some(SymbolRate::new(
                canonical_symbol(market),
                rate,
                observed_at,
            ))),
            MockMarket::Absent => Ok(None),
            MockMarket::FlakyThenRate(failures, rate) => {
                if attempt <= failures {
                    Err(ExchangeError::ConnectionFailed(format!(
                        "mock failure {} for {}",
                        attempt, market
                    )))
                } else {
                    Ok(Some(SymbolRate::new(
                        canonical_symbol(market),
                        rate,
                        observed_at,
                    )))
                }
            }
            MockMarket::AlwaysFail => Err(ExchangeError::Api {
                status: 500,
                message: format!("mock failure for {}", market),
            }),
            MockMarket::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
                Ok(None)
            }
        }
    }
}
