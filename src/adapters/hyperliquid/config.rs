//! Hyperliquid Configuration
//!
//! Configuration for Hyperliquid public info API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Mainnet REST base URL
const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";

/// Testnet REST base URL
const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for Hyperliquid exchange connection (public market data)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperliquidConfig {
    /// Use production endpoints
    pub production: bool,
    /// Explicit base URL, overrides `production` (used by tests and proxies)
    pub api_url: Option<String>,
}

impl Default for HyperliquidConfig {
    fn default() -> Self {
        Self {
            production: true,
            api_url: None,
        }
    }
}

impl HyperliquidConfig {
    /// Configuration pointing at an arbitrary base URL
    pub fn with_api_url(url: impl Into<String>) -> Self {
        Self {
            production: true,
            api_url: Some(url.into()),
        }
    }

    /// Get REST base URL
    pub fn api_url(&self) -> &str {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/'),
            None if self.production => MAINNET_API_URL,
            None => TESTNET_API_URL,
        }
    }

    /// Get the `/info` endpoint every public query is POSTed to
    pub fn info_url(&self) -> String {
        format!("{}/info", self.api_url())
    }
}
