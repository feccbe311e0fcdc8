//! Core module - fetch executor, detector, report, delivery, scheduler
//!
//! This module uses **explicit re-exports** instead of glob exports
//! (`pub use module::*`) so the public API only changes on purpose.
//!
//! ## Usage
//! ```ignore
//! use crate::core::{detect, fetch_snapshot, Scheduler};
//! ```

pub mod delivery;
pub mod detector;
pub mod fetcher;
pub mod report;
pub mod scheduler;
pub mod types;

// Data model
pub use types::{ArbitrageOpportunity, ExchangeSnapshot, PositionSide, RankedReport};

// Pipeline stages
pub use detector::detect;
pub use fetcher::{fetch_snapshot, fetch_with_retry};
pub use report::format_report;

// Delivery seams
pub use delivery::{deliver_to_all, DeliverySummary, Notifier, SubscriberId, SubscriberStore};

// Scheduling
pub use scheduler::{
    next_boundary, supervise, until_next_hour, Clock, CycleOutcome, Scheduler, SchedulerState,
    SystemClock,
};
