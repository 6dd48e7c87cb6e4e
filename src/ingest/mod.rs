// src/ingest/mod.rs
pub mod extract;
pub mod fetch;
pub mod providers;
pub mod types;

use crate::ingest::types::{FetchOutcome, RawListing, SourceProvider, SourceReport};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up once a recorder is installed).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("tender_source_fetch_total", "Source fetch attempts.");
        describe_counter!(
            "tender_source_errors_total",
            "Source fetches that failed at transport/decode level."
        );
        describe_counter!(
            "tender_element_errors_total",
            "Listing elements skipped because they could not be parsed."
        );
        describe_counter!("tender_listings_total", "Listings extracted from sources.");
        describe_counter!(
            "tender_matched_total",
            "Listings that matched at least one keyword."
        );
        describe_counter!("tender_notify_total", "Webhook delivery attempts.");
    });
}

/// Collapse whitespace (incl. NBSP and ideographic space) and trim.
pub fn normalize_text(s: &str) -> String {
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").expect("static regex"));
    re_ws.replace_all(s, " ").trim().to_string()
}

/// Fetch every provider in order, one at a time.
/// A failing source is logged and reported; it never aborts the others.
pub async fn run_once(providers: &[Box<dyn SourceProvider>]) -> Vec<SourceReport> {
    ensure_metrics_described();

    let mut reports = Vec::with_capacity(providers.len());
    for p in providers {
        tracing::info!("Fetching {}...", p.name());
        counter!("tender_source_fetch_total").increment(1);

        let outcome = p.fetch_latest().await;
        match &outcome {
            FetchOutcome::Fetched { listings, skipped } => {
                tracing::info!(
                    listings = listings.len(),
                    skipped = skipped.len(),
                    "{} fetch completed",
                    p.name()
                );
                counter!("tender_listings_total").increment(listings.len() as u64);
                counter!("tender_element_errors_total").increment(skipped.len() as u64);
            }
            FetchOutcome::Failed(e) => {
                tracing::error!("Fetch {} error: {e}", p.name());
                counter!("tender_source_errors_total").increment(1);
            }
            FetchOutcome::NotImplemented => {
                tracing::warn!(
                    "{} fetched, but listing extraction is not implemented; no records",
                    p.name()
                );
            }
        }

        reports.push(SourceReport {
            source: p.name().to_string(),
            outcome,
        });
    }
    reports
}

/// All listings across reports, in discovery order.
pub fn aggregate(reports: &[SourceReport]) -> Vec<RawListing> {
    reports
        .iter()
        .flat_map(|r| r.outcome.listings().iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_folds_unicode_spaces() {
        assert_eq!(normalize_text("  深圳\u{3000}园区\u{00A0}\n运营  "), "深圳 园区 运营");
        assert_eq!(normalize_text(""), "");
    }
}
