//! Arbitrage detector
//!
//! Joins two exchange snapshots on symbol and ranks the funding
//! divergences. Pure and total: any pair of snapshots, empty ones
//! included, yields a valid report.

use std::cmp::Ordering;

use crate::core::types::{ArbitrageOpportunity, ExchangeSnapshot, PositionSide, RankedReport};

/// Funding fractions are reported in percent
const PERCENT: f64 = 100.0;

/// Compare one symbol across both exchanges.
///
/// The side paying the higher rate is shorted. Strict `>`: on an exact tie
/// exchange A is long and exchange B short.
pub fn compare(symbol: &str, rate_a: f64, rate_b: f64) -> ArbitrageOpportunity {
    let rate_a = rate_a * PERCENT;
    let rate_b = rate_b * PERCENT;

    let (direction_a, direction_b) = if rate_a > rate_b {
        (PositionSide::Short, PositionSide::Long)
    } else {
        (PositionSide::Long, PositionSide::Short)
    };

    ArbitrageOpportunity {
        symbol: symbol.to_string(),
        rate_a,
        rate_b,
        direction_a,
        direction_b,
        spread: (rate_a - rate_b).abs(),
    }
}

/// Rank the symbols listed on both exchanges by spread, keeping `top_n`.
///
/// Equal spreads keep symbol order (stable sort over the ordered
/// intersection).
pub fn detect(a: &ExchangeSnapshot, b: &ExchangeSnapshot, top_n: usize) -> RankedReport {
    let mut opportunities: Vec<ArbitrageOpportunity> = a
        .rates
        .iter()
        .filter_map(|(symbol, rate_a)| {
            b.get(symbol)
                .map(|rate_b| compare(symbol, rate_a.rate, rate_b.rate))
        })
        .collect();

    opportunities.sort_by(|x, y| y.spread.partial_cmp(&x.spread).unwrap_or(Ordering::Equal));
    opportunities.truncate(top_n);

    RankedReport {
        exchange_a: a.exchange,
        exchange_b: b.exchange,
        opportunities,
    }
}

// =============================================================================
// Tests
// =============================================================================
