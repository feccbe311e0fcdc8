//! Configuration module for pipeline settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `PipelineConfig`)
//! - YAML loading functionality (`load_config`)
//! - Logging configuration (`init_logging`)
//! - Secret lookup (`telegram_token`)

mod loader;
pub mod logging;
mod types;

// Re-export types
pub use types::{AppConfig, PipelineConfig, SubscribersConfig, TelegramConfig};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str, load_config_or_default};

// Re-export logging functions
pub use logging::init_logging;

use crate::error::AppError;

/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";

/// Read the Telegram bot token from the environment
///
/// Tokens have the form `<bot id>:<secret>`; anything else is rejected
/// before the first delivery is attempted.
pub fn telegram_token() -> Result<String, AppError> {
    let token = std::env::var(TELEGRAM_TOKEN_VAR)
        .map_err(|_| AppError::Config(format!("{} not set", TELEGRAM_TOKEN_VAR)))?;
    let token = token.trim().to_string();
    if token.is_empty() || !token.contains(':') {
        return Err(AppError::Config(format!(
            "{} has an invalid format",
            TELEGRAM_TOKEN_VAR
        )));
    }
    Ok(token)
}
