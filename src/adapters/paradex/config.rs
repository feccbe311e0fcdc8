//! Paradex Configuration
//!
//! Configuration structures for Paradex public REST API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for Paradex exchange connection (public market data only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParadexConfig {
    /// Use production endpoints (true) or testnet (false)
    pub production: bool,
    /// Explicit REST base URL including `/v1`, overrides `production`
    pub api_url: Option<String>,
}

impl ParadexConfig {
    /// Configuration pointing at an arbitrary base URL
    pub fn with_api_url(url: impl Into<String>) -> Self {
        Self {
            production: true,
            api_url: Some(url.into()),
        }
    }

    /// Get REST API base URL
    pub fn rest_base_url(&self) -> &str {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/'),
            None if self.production => "https://api.prod.paradex.trade/v1",
            None => "https://api.testnet.paradex.trade/v1",
        }
    }
}

impl Default for ParadexConfig {
    fn default() -> Self {
        Self {
            production: true,
            api_url: None,
        }
    }
}
