// src/runner.rs
//! One monitoring pass: fetch → match → prioritize → format → persist → notify.
//! Scheduling is external (cron/systemd timer); a run has no loop or retry.

use anyhow::Result;
use chrono::{DateTime, Local};
use metrics::counter;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::analyze::{prioritize, Matcher};
use crate::config::MonitorConfig;
use crate::ingest::fetch::HttpFetcher;
use crate::ingest::providers::build_providers;
use crate::ingest::types::{SourceProvider, SourceReport};
use crate::notify::{DeliveryOutcome, FeishuNotifier, Notifier};
use crate::report::format_message;
use crate::store::{ensure_parent_dir, write_snapshot, ResultSnapshot};

#[derive(Debug)]
pub struct RunSummary {
    pub high: usize,
    pub medium: usize,
    pub sources: Vec<SourceReport>,
    pub delivery: DeliveryOutcome,
    pub message: String,
    pub result_file: PathBuf,
}

pub struct Runner {
    config: MonitorConfig,
    matcher: Matcher,
    providers: Vec<Box<dyn SourceProvider>>,
    notifier: Box<dyn Notifier>,
}

impl Runner {
    pub fn new(
        config: MonitorConfig,
        providers: Vec<Box<dyn SourceProvider>>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let matcher = Matcher::from_config(&config);
        Self {
            config,
            matcher,
            providers,
            notifier,
        }
    }

    /// Wire the configured sources and the Feishu notifier.
    pub fn from_config(config: MonitorConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        let providers = build_providers(&config, &fetcher)?;
        let notifier = Box::new(FeishuNotifier::from_config(&config));
        Ok(Self::new(config, providers, notifier))
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_at(Local::now()).await
    }

    /// Only filesystem errors (result dir / file) escape; fetch and delivery
    /// problems end up in the summary.
    pub async fn run_at(&self, now: DateTime<Local>) -> Result<RunSummary> {
        info!("{}", "=".repeat(50));
        info!("Starting daily intel scrape...");
        info!("Keywords: {:?}", self.config.keywords);
        info!("Regions: {:?}", self.config.regions);
        for w in self.config.warnings() {
            warn!("{w}");
        }

        let result_file = self.config.output.result_file.clone();
        ensure_parent_dir(&result_file)?;

        let sources = crate::ingest::run_once(&self.providers).await;
        let listings = crate::ingest::aggregate(&sources);
        let matched = self.matcher.match_all(listings);
        counter!("tender_matched_total").increment(matched.len() as u64);

        let tiers = prioritize(matched, self.matcher.primary_region());
        info!(
            "Found {} high priority, {} medium priority",
            tiers.high.len(),
            tiers.medium.len()
        );

        let message = format_message(&tiers, now.date_naive(), &self.config.message);

        write_snapshot(&result_file, &ResultSnapshot::new(now, &tiers))?;
        info!(path = %result_file.display(), "results saved");

        let delivery = self.notifier.send(&message).await;

        info!("Daily intel scrape completed");
        Ok(RunSummary {
            high: tiers.high.len(),
            medium: tiers.medium.len(),
            sources,
            delivery,
            message,
            result_file,
        })
    }
}
