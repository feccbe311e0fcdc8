//! Funding Rate Arbitrage Monitor
//!
//! Compares perpetual funding rates between Hyperliquid and Paradex every
//! hour and sends the widest divergences to Telegram subscribers:
//! - Exchange adapters behind the `FundingRateSource` trait
//! - Batched, retrying fetch executor
//! - Arbitrage detector and report formatter
//! - Wall-clock aligned scheduler with per-recipient delivery

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod notify;

pub use error::AppError;
