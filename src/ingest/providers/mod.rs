// src/ingest/providers/mod.rs
pub mod listing_page;
pub mod placeholder;

use anyhow::Result;

use crate::config::{MonitorConfig, SourceKind};
use crate::ingest::fetch::HttpFetcher;
use crate::ingest::types::SourceProvider;

pub use listing_page::ListingPageProvider;
pub use placeholder::PlaceholderProvider;

/// One provider per configured source, in config order.
pub fn build_providers(
    cfg: &MonitorConfig,
    fetcher: &HttpFetcher,
) -> Result<Vec<Box<dyn SourceProvider>>> {
    let mut out: Vec<Box<dyn SourceProvider>> = Vec::with_capacity(cfg.sources.len());
    for src in &cfg.sources {
        let p: Box<dyn SourceProvider> = match src.kind {
            SourceKind::Listing => Box::new(ListingPageProvider::new(src, fetcher.clone())?),
            SourceKind::Placeholder => Box::new(PlaceholderProvider::new(src, fetcher.clone())),
        };
        out.push(p);
    }
    Ok(out)
}
