// src/analyze/matcher.rs
use crate::config::MonitorConfig;
use crate::ingest::types::RawListing;
use crate::record::{Priority, TenderRecord};

/// Substring matcher over configured keywords and regions.
/// Configured order is significant: it decides keyword order and which region wins.
#[derive(Debug, Clone)]
pub struct Matcher {
    keywords: Vec<String>,
    regions: Vec<String>,
    primary_region: String,
}

impl Matcher {
    pub fn new(
        keywords: Vec<String>,
        regions: Vec<String>,
        primary_region: impl Into<String>,
    ) -> Self {
        Self {
            keywords,
            regions,
            primary_region: primary_region.into(),
        }
    }

    pub fn from_config(cfg: &MonitorConfig) -> Self {
        Self::new(
            cfg.keywords.clone(),
            cfg.regions.clone(),
            cfg.primary_region.clone(),
        )
    }

    pub fn primary_region(&self) -> &str {
        &self.primary_region
    }

    pub fn matched_keywords(&self, title: &str) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|k| title.contains(k.as_str()))
            .cloned()
            .collect()
    }

    pub fn matched_region(&self, title: &str) -> Option<String> {
        self.regions
            .iter()
            .find(|r| title.contains(r.as_str()))
            .cloned()
    }

    /// `None` when the title carries no keyword. Priority set here is provisional;
    /// `prioritize` has the final word.
    pub fn match_listing(&self, listing: RawListing) -> Option<TenderRecord> {
        let keywords = self.matched_keywords(&listing.title);
        if keywords.is_empty() {
            return None;
        }
        let region = self.matched_region(&listing.title);
        let priority = if region.as_deref() == Some(self.primary_region.as_str()) {
            Priority::High
        } else {
            Priority::Medium
        };

        Some(TenderRecord {
            source: listing.source,
            title: listing.title,
            link: listing.link,
            date: listing.date,
            keywords,
            region,
            priority,
        })
    }

    pub fn match_all(&self, listings: Vec<RawListing>) -> Vec<TenderRecord> {
        listings
            .into_iter()
            .filter_map(|l| self.match_listing(l))
            .collect()
    }
}
