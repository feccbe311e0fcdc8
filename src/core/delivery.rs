//! Delivery fan-out
//!
//! Sends one payload to every subscriber. Recipients are independent: a
//! failed delivery is logged and counted, the rest still receive.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Chat identifier of one subscriber
pub type SubscriberId = i64;

/// Read-only view of the subscriber list
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Current subscribers; read fresh on every call
    async fn list_subscribers(&self) -> Result<Vec<SubscriberId>>;
}

/// Outbound message channel
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, recipient: &SubscriberId, payload: &str) -> Result<()>;
}

/// Outcome counters for one fan-out
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliverySummary {
    pub delivered: usize,
    pub failed: usize,
}

/// Deliver `payload` to each recipient in order, without retries.
pub async fn deliver_to_all(
    notifier: &dyn Notifier,
    recipients: &[SubscriberId],
    payload: &str,
) -> DeliverySummary {
    let mut summary = DeliverySummary::default();

    for recipient in recipients {
        match notifier.deliver(recipient, payload).await {
            Ok(()) => {
                summary.delivered += 1;
                debug!(recipient, "Report delivered");
            }
            Err(e) => {
                summary.failed += 1;
                warn!(recipient, error = %e, "Delivery failed");
            }
        }
    }

    info!(
        recipients = recipients.len(),
        delivered = summary.delivered,
        failed = summary.failed,
        "Fan-out complete"
    );
    summary
}
