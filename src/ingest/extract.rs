// src/ingest/extract.rs
//! Listing-page extraction: item elements → (title, link, date).
//!
//! Extraction is per element; one malformed element is recorded and skipped,
//! the rest of the page still goes through.

use anyhow::{anyhow, bail, Context, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::ListingSelectors;
use crate::ingest::normalize_text;
use crate::ingest::types::RawListing;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    #[error("listing #{index}: anchor has no text")]
    EmptyTitle { index: usize },
}

/// Selectors parsed once per provider.
#[derive(Debug)]
pub struct CompiledSelectors {
    item: Selector,
    title: Selector,
    date: Selector,
}

impl CompiledSelectors {
    pub fn compile(s: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            item: parse_selector(&s.item)?,
            title: parse_selector(&s.title)?,
            date: parse_selector(&s.date)?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid css selector `{css}`: {e:?}"))
}

#[derive(Debug, Default)]
pub struct ExtractReport {
    pub listings: Vec<RawListing>,
    pub skipped: Vec<ElementError>,
}

/// `scheme://host[:port]` of a source URL.
pub fn origin_of(url: &str) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("parsing source url {url}"))?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        bail!("source url {url} has no usable origin");
    }
    Ok(origin.ascii_serialization())
}

/// Absolute http(s) links pass through; anything else is resolved against `origin`.
/// An empty href yields the origin itself.
pub fn normalize_link(origin: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return origin.to_string();
    }
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        // protocol-relative: borrow the origin's scheme
        let scheme = origin.split("://").next().unwrap_or("http");
        return format!("{scheme}://{rest}");
    }
    let base = origin.trim_end_matches('/');
    let path = href.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Concatenate trimmed text nodes, then fold whitespace.
fn element_text(el: ElementRef<'_>) -> String {
    let joined: String = el.text().map(str::trim).collect();
    normalize_text(&joined)
}

fn extract_one(
    index: usize,
    item: ElementRef<'_>,
    source: &str,
    origin: &str,
    selectors: &CompiledSelectors,
) -> Result<Option<RawListing>, ElementError> {
    let Some(anchor) = item.select(&selectors.title).next() else {
        return Ok(None);
    };

    let title = element_text(anchor);
    if title.is_empty() {
        return Err(ElementError::EmptyTitle { index });
    }

    // a titled anchor without href is still a listing; it points at the site root
    let href = anchor.value().attr("href").unwrap_or_default();
    if href.trim().is_empty() {
        tracing::debug!(source, index, %title, "anchor without href, linking to origin");
    }

    let date = item
        .select(&selectors.date)
        .next()
        .map(element_text)
        .unwrap_or_default();

    Ok(Some(RawListing {
        source: source.to_string(),
        title,
        link: normalize_link(origin, href),
        date,
    }))
}

/// Walk the first `limit` item elements of `html`.
pub fn extract_listings(
    html: &str,
    source: &str,
    origin: &str,
    selectors: &CompiledSelectors,
    limit: usize,
) -> ExtractReport {
    let doc = Html::parse_document(html);
    let mut report = ExtractReport::default();

    for (index, item) in doc.select(&selectors.item).take(limit).enumerate() {
        match extract_one(index, item, source, origin, selectors) {
            Ok(Some(listing)) => report.listings.push(listing),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(source, error = %e, "parse item error");
                report.skipped.push(e);
            }
        }
    }

    report
}
