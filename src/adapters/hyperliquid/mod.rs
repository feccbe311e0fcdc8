//! Hyperliquid exchange adapter module
//!
//! Provides funding rates from Hyperliquid's public info API.

pub mod adapter;
pub mod config;
pub mod types;

pub use adapter::HyperliquidAdapter;
pub use config::HyperliquidConfig;
