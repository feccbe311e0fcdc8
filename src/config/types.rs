//! Configuration types for the funding monitor
//!
//! This module defines all configuration structs that are loaded from YAML
//! once at startup and passed by reference into adapters and the scheduler.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::{HyperliquidConfig, ParadexConfig};
use crate::error::AppError;

// ============================================================================
// Pipeline
// ============================================================================

/// Longest accepted funding lookback: one week
pub const MAX_LOOKBACK_SECS: u64 = 7 * 24 * 3600;

/// Longest accepted retry backoff base: one minute
pub const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

/// Fetch, retry and ranking parameters for one pipeline cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lookback used to find the latest funding observation (seconds)
    pub lookback_secs: u64,
    /// Markets fetched concurrently per batch
    pub batch_size: usize,
    /// Pause between consecutive batches (milliseconds)
    pub batch_pause_ms: u64,
    /// Attempts per market before it is dropped from the snapshot
    pub max_attempts: u32,
    /// Retry pause base; attempt k waits `k × retry_backoff_ms`
    pub retry_backoff_ms: u64,
    /// Upper bound for every single exchange request (milliseconds)
    pub request_timeout_ms: u64,
    /// Number of opportunities kept in the report
    pub report_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lookback_secs: 3600,
            batch_size: 5,
            batch_pause_ms: 200,
            max_attempts: 3,
            retry_backoff_ms: 200,
            request_timeout_ms: 10_000,
            report_size: 5,
        }
    }
}

impl PipelineConfig {
    pub fn lookback(&self) -> Duration {
        Duration::from_secs(self.lookback_secs)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate pipeline rules
    pub fn validate(&self) -> Result<(), AppError> {
        if self.batch_size == 0 {
            return Err(AppError::Config("pipeline.batch_size must be > 0".into()));
        }
        if self.max_attempts == 0 {
            return Err(AppError::Config("pipeline.max_attempts must be > 0".into()));
        }
        if self.report_size == 0 {
            return Err(AppError::Config("pipeline.report_size must be > 0".into()));
        }
        if self.lookback_secs == 0 || self.lookback_secs > MAX_LOOKBACK_SECS {
            return Err(AppError::Config(format!(
                "pipeline.lookback_secs must be in 1..={}",
                MAX_LOOKBACK_SECS
            )));
        }
        if self.retry_backoff_ms > MAX_RETRY_BACKOFF_MS {
            return Err(AppError::Config(format!(
                "pipeline.retry_backoff_ms must be <= {}",
                MAX_RETRY_BACKOFF_MS
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(AppError::Config(
                "pipeline.request_timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Collaborators
// ============================================================================

/// Where subscriber chat ids are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscribersConfig {
    /// JSON file holding an array of chat ids
    pub path: PathBuf,
}

impl Default for SubscribersConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("subscribed_users.json"),
        }
    }
}

/// Telegram Bot API endpoint (the token comes from `TELEGRAM_TOKEN`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
        }
    }
}

// ============================================================================
// Root
// ============================================================================

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub hyperliquid: HyperliquidConfig,
    pub paradex: ParadexConfig,
    pub subscribers: SubscribersConfig,
    pub telegram: TelegramConfig,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        self.pipeline.validate()?;

        if self.telegram.api_url.trim().is_empty() {
            return Err(AppError::Config("telegram.api_url cannot be empty".into()));
        }
        if self.subscribers.path.as_os_str().is_empty() {
            return Err(AppError::Config("subscribers.path cannot be empty".into()));
        }
        for (name, url) in [
            ("hyperliquid.api_url", &self.hyperliquid.api_url),
            ("paradex.api_url", &self.paradex.api_url),
        ] {
            if matches!(url, Some(u) if u.trim().is_empty()) {
                return Err(AppError::Config(format!("{} cannot be empty", name)));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
