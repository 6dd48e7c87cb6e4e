// src/ingest/providers/placeholder.rs
use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::config::SourceConfig;
use crate::ingest::fetch::HttpFetcher;
use crate::ingest::types::{FetchOutcome, SourceProvider};

/// Source that is requested but not parsed yet (the Shenzhen GGZY search page
/// renders its results client-side). Reports `NotImplemented` rather than an
/// empty success so a missing extractor stays visible.
pub struct PlaceholderProvider {
    name: String,
    url: String,
    query: BTreeMap<String, String>,
    fetcher: HttpFetcher,
}

impl PlaceholderProvider {
    pub fn new(src: &SourceConfig, fetcher: HttpFetcher) -> Self {
        Self {
            name: src.name.clone(),
            url: src.url.clone(),
            query: src.query.clone(),
            fetcher,
        }
    }
}

#[async_trait]
impl SourceProvider for PlaceholderProvider {
    async fn fetch_latest(&self) -> FetchOutcome {
        match self.fetcher.get_html(&self.url, &self.query).await {
            Ok(_discarded) => FetchOutcome::NotImplemented,
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
