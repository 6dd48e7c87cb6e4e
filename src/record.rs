//! Tender records as they leave the matcher and go to the report, store and notifier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// A listing that matched at least one keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenderRecord {
    pub source: String,
    pub title: String,
    pub link: String,
    pub date: String,
    /// Matched keywords in configured order; never empty.
    pub keywords: Vec<String>,
    /// First configured region found in the title.
    pub region: Option<String>,
    pub priority: Priority,
}

/// Records split by priority, each tier in discovery order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Tiers {
    pub high: Vec<TenderRecord>,
    pub medium: Vec<TenderRecord>,
}

impl Tiers {
    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.medium.is_empty()
    }
}
