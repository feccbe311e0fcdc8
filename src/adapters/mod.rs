//! Exchange adapters for funding rate sources
//!
//! This module provides the core abstraction over exchanges
//! (`FundingRateSource`) and the Hyperliquid and Paradex implementations.

pub mod errors;
pub mod hyperliquid;
pub mod paradex;
#[cfg(test)]
pub mod test_utils;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use errors::{ExchangeError, ExchangeResult};
pub use hyperliquid::{HyperliquidAdapter, HyperliquidConfig};
pub use paradex::{ParadexAdapter, ParadexConfig};
pub use traits::FundingRateSource;
pub use types::{canonical_symbol, FundingWindow, SymbolRate};
