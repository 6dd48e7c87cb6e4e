// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod analyze;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod notify;
pub mod record;
pub mod report;
pub mod runner;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::MonitorConfig;
pub use crate::notify::{DeliveryOutcome, FeishuNotifier, Notifier};
pub use crate::record::{Priority, TenderRecord, Tiers};
pub use crate::runner::{RunSummary, Runner};
