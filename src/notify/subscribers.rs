//! File-backed subscriber store
//!
//! The file holds a JSON array of chat ids, e.g. `[123456789, -100200300]`.
//! It is read on every call so edits take effect on the next cycle.
//! Repeated ids are listed once, in first-seen order.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::core::delivery::{SubscriberId, SubscriberStore};
use crate::error::{AppError, Result};

pub struct JsonFileSubscriberStore {
    path: PathBuf,
}

impl JsonFileSubscriberStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubscriberStore for JsonFileSubscriberStore {
    async fn list_subscribers(&self) -> Result<Vec<SubscriberId>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Subscriber file not found, no subscribers");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut subscribers: Vec<SubscriberId> = serde_json::from_str(&content).map_err(|e| {
            AppError::Store(format!("invalid subscriber file '{}': {}", self.path.display(), e))
        })?;

        let mut seen = BTreeSet::new();
        let listed = subscribers.len();
        subscribers.retain(|id| seen.insert(*id));
        if subscribers.len() < listed {
            debug!(
                path = %self.path.display(),
                duplicates = listed - subscribers.len(),
                "Duplicate subscriber ids ignored"
            );
        }

        debug!(path = %self.path.display(), count = subscribers.len(), "Subscribers loaded");
        Ok(subscribers)
    }
}
