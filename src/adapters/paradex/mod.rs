//! Paradex exchange adapter module
//!
//! Provides the latest per-market funding snapshot from Paradex REST API.

pub mod adapter;
pub mod config;
pub mod types;

pub use adapter::ParadexAdapter;
pub use config::ParadexConfig;
