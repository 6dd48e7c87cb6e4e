// src/ingest/providers/listing_page.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::config::SourceConfig;
use crate::ingest::extract::{extract_listings, origin_of, CompiledSelectors};
use crate::ingest::fetch::HttpFetcher;
use crate::ingest::types::{FetchOutcome, SourceProvider};

/// A paged list of notices (`<li class="li">` rows on the CCGP Guangdong site).
pub struct ListingPageProvider {
    name: String,
    url: String,
    origin: String,
    query: BTreeMap<String, String>,
    limit: usize,
    selectors: CompiledSelectors,
    fetcher: HttpFetcher,
}

impl ListingPageProvider {
    pub fn new(src: &SourceConfig, fetcher: HttpFetcher) -> Result<Self> {
        let selectors = CompiledSelectors::compile(&src.selectors)
            .with_context(|| format!("selectors for source {}", src.name))?;
        Ok(Self {
            name: src.name.clone(),
            url: src.url.clone(),
            origin: origin_of(&src.url)?,
            query: src.query.clone(),
            limit: src.limit,
            selectors,
            fetcher,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

#[async_trait]
impl SourceProvider for ListingPageProvider {
    async fn fetch_latest(&self) -> FetchOutcome {
        let body = match self.fetcher.get_html(&self.url, &self.query).await {
            Ok(b) => b,
            Err(e) => return FetchOutcome::Failed(e),
        };
        // Parsed DOM is not Send; keep it out of any await.
        let report = extract_listings(&body, &self.name, &self.origin, &self.selectors, self.limit);
        FetchOutcome::Fetched {
            listings: report.listings,
            skipped: report.skipped,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
