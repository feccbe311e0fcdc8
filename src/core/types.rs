//! Core data types for the funding arbitrage pipeline.
//!
//! Everything here lives for one scheduler cycle: snapshots are built by
//! the fetcher, joined by the detector, rendered by the report formatter,
//! and dropped once the report is delivered.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adapters::SymbolRate;

// =============================================================================
// Exchange Snapshot
// =============================================================================

/// Per-symbol funding rates for one exchange, captured in one cycle.
///
/// Markets with no data or that exhausted their retries are simply absent.
/// `BTreeMap` keeps iteration (and therefore ranking ties) ordered by symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeSnapshot {
    /// Exchange identifier (e.g. "hyperliquid")
    pub exchange: &'static str,
    /// Canonical symbol → latest rate
    pub rates: BTreeMap<String, SymbolRate>,
}

impl ExchangeSnapshot {
    pub fn new(exchange: &'static str) -> Self {
        Self {
            exchange,
            rates: BTreeMap::new(),
        }
    }

    /// Insert a rate, keeping the first observation for a symbol.
    ///
    /// Returns false when the symbol was already present.
    pub fn insert(&mut self, rate: SymbolRate) -> bool {
        match self.rates.entry(rate.symbol.clone()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(rate);
                true
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolRate> {
        self.rates.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Build a snapshot from `(symbol, rate)` pairs (tests, benches).
    pub fn from_rates<'a>(
        exchange: &'static str,
        rates: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        let now = chrono::Utc::now();
        let mut snapshot = Self::new(exchange);
        for (symbol, rate) in rates {
            snapshot.insert(SymbolRate::new(symbol, rate, now));
        }
        snapshot
    }
}

// =============================================================================
// Position Side
// =============================================================================

/// Side to hold on one exchange to collect the funding differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Long => write!(f, "long"),
            PositionSide::Short => write!(f, "short"),
        }
    }
}

// =============================================================================
// Arbitrage Opportunity
// =============================================================================

/// Funding divergence for one symbol listed on both exchanges.
///
/// Rates and spread are in percent units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub symbol: String,
    /// Exchange A rate, percent
    pub rate_a: f64,
    /// Exchange B rate, percent
    pub rate_b: f64,
    pub direction_a: PositionSide,
    pub direction_b: PositionSide,
    /// |rate_a − rate_b|, percent
    pub spread: f64,
}

// =============================================================================
// Ranked Report
// =============================================================================

/// Top opportunities of one cycle, sorted by spread descending.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedReport {
    /// Exchange A, identifier until `with_labels` swaps in the display name
    pub exchange_a: &'static str,
    /// Exchange B, identifier until `with_labels` swaps in the display name
    pub exchange_b: &'static str,
    pub opportunities: Vec<ArbitrageOpportunity>,
}

impl RankedReport {
    pub fn empty(exchange_a: &'static str, exchange_b: &'static str) -> Self {
        Self {
            exchange_a,
            exchange_b,
            opportunities: Vec::new(),
        }
    }

    /// Replace the exchange columns with report labels
    pub fn with_labels(mut self, exchange_a: &'static str, exchange_b: &'static str) -> Self {
        self.exchange_a = exchange_a;
        self.exchange_b = exchange_b;
        self
    }

    pub fn len(&self) -> usize {
        self.opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}
