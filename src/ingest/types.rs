// src/ingest/types.rs
use serde::{Deserialize, Serialize};

use crate::ingest::extract::ElementError;
use crate::ingest::fetch::FetchError;

/// One listing as scraped from a page, before keyword/region matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawListing {
    pub source: String, // e.g. "广东省政府采购网"
    pub title: String,
    pub link: String, // absolute
    pub date: String, // as printed on the page, may be empty
}

/// What one source produced during a run.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched {
        listings: Vec<RawListing>,
        skipped: Vec<ElementError>,
    },
    Failed(FetchError),
    /// Source is wired up (request is sent) but has no extraction logic yet.
    NotImplemented,
}

impl FetchOutcome {
    pub fn listings(&self) -> &[RawListing] {
        match self {
            FetchOutcome::Fetched { listings, .. } => listings,
            _ => &[],
        }
    }

    pub fn into_listings(self) -> Vec<RawListing> {
        match self {
            FetchOutcome::Fetched { listings, .. } => listings,
            _ => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

#[derive(Debug)]
pub struct SourceReport {
    pub source: String,
    pub outcome: FetchOutcome,
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    /// Never fails as a whole: transport and parse problems land in the outcome.
    async fn fetch_latest(&self) -> FetchOutcome;
    fn name(&self) -> &str;
}
