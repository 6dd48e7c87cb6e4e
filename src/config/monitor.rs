// src/config/monitor.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const ENV_CONFIG_PATH: &str = "TENDER_MONITOR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/monitor.toml";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

fn default_keywords() -> Vec<String> {
    ["园区运营", "资产管理", "产业服务", "城投", "产业园招商", "招商引资"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_regions() -> Vec<String> {
    ["深圳", "广州", "东莞", "佛山", "珠海"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_primary_region() -> String {
    "深圳".to_string()
}
fn default_webhook_env() -> String {
    "FEISHU_WEBHOOK".to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_log_file() -> PathBuf {
    PathBuf::from("logs/scraper.log")
}
fn default_result_file() -> PathBuf {
    PathBuf::from("logs/daily_result.json")
}
fn default_per_tier_limit() -> usize {
    5
}
fn default_contact() -> String {
    "AoKen".to_string()
}
fn default_listing_limit() -> usize {
    10
}
fn default_item_selector() -> String {
    "li.li".to_string()
}
fn default_title_selector() -> String {
    "a".to_string()
}
fn default_date_selector() -> String {
    "span.date".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Applies to every GET and to the webhook POST.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_result_file")]
    pub result_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            result_file: default_result_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageConfig {
    /// Entries shown per tier in the chat message; the result file is never truncated.
    #[serde(default = "default_per_tier_limit")]
    pub per_tier_limit: usize,
    /// Handle mentioned in the closing block for custom pitch requests.
    #[serde(default = "default_contact")]
    pub contact: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            per_tier_limit: default_per_tier_limit(),
            contact: default_contact(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A listing page scraped with the configured selectors.
    #[default]
    Listing,
    /// Request is sent but the response is discarded.
    Placeholder,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ListingSelectors {
    #[serde(default = "default_item_selector")]
    pub item: String,
    #[serde(default = "default_title_selector")]
    pub title: String,
    #[serde(default = "default_date_selector")]
    pub date: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: default_item_selector(),
            title: default_title_selector(),
            date: default_date_selector(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    /// Only the first `limit` listing elements on the page are considered.
    #[serde(default = "default_listing_limit")]
    pub limit: usize,
    #[serde(default)]
    pub selectors: ListingSelectors,
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            name: "广东省政府采购网".to_string(),
            url: "http://www.ccgp-guangdong.gov.cn/queryMoreInfoList.do".to_string(),
            kind: SourceKind::Listing,
            query: BTreeMap::from([
                ("channelCode".to_string(), "0005".to_string()),
                ("page".to_string(), "1".to_string()),
                ("pageSize".to_string(), "20".to_string()),
            ]),
            limit: default_listing_limit(),
            selectors: ListingSelectors::default(),
        },
        SourceConfig {
            name: "深圳公共资源交易中心".to_string(),
            url: "https://www.szggzy.com/globalSearch/search.html".to_string(),
            kind: SourceKind::Placeholder,
            query: BTreeMap::new(),
            limit: default_listing_limit(),
            selectors: ListingSelectors::default(),
        },
    ]
}

/// Everything a run needs. Built once at startup and handed to the runner.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    #[serde(default = "default_primary_region")]
    pub primary_region: String,
    /// Name of the env var holding the webhook URL (never the URL itself).
    #[serde(default = "default_webhook_env")]
    pub webhook_env: String,
    /// Resolved from `webhook_env` at load time.
    #[serde(skip)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub message: MessageConfig,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            regions: default_regions(),
            primary_region: default_primary_region(),
            webhook_env: default_webhook_env(),
            webhook_url: None,
            http: HttpConfig::default(),
            output: OutputConfig::default(),
            message: MessageConfig::default(),
            sources: default_sources(),
        }
    }
}

impl MonitorConfig {
    /// Parse TOML, clean the lists and validate. Does not touch the environment.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: MonitorConfig = toml::from_str(s).context("parsing monitor config")?;
        cfg.keywords = clean_list(cfg.keywords);
        cfg.regions = clean_list(cfg.regions);
        cfg.primary_region = cfg.primary_region.trim().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading monitor config from {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&content)?;
        cfg.resolve_webhook_from_env();
        Ok(cfg)
    }

    /// Load config using env var + fallbacks:
    /// 1) $TENDER_MONITOR_CONFIG
    /// 2) config/monitor.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::load_from(&default_path);
        }
        let mut cfg = Self::default();
        cfg.resolve_webhook_from_env();
        Ok(cfg)
    }

    /// Empty values count as unset.
    pub fn resolve_webhook_from_env(&mut self) {
        self.webhook_url = env::var(&self.webhook_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
    }

    pub fn validate(&self) -> Result<()> {
        if self.keywords.is_empty() {
            bail!("monitor config has no keywords");
        }
        if self.http.timeout_secs == 0 {
            bail!("http.timeout_secs must be > 0");
        }
        for s in &self.sources {
            if s.name.trim().is_empty() {
                bail!("source with url {} has an empty name", s.url);
            }
        }
        Ok(())
    }

    /// Non-fatal problems. Returned rather than logged: config loads before
    /// the subscriber exists, so the runner logs these once logging is up.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.regions.iter().any(|r| r == &self.primary_region) {
            out.push(format!(
                "primary region {} is not among configured regions; nothing will be high priority",
                self.primary_region
            ));
        }
        out
    }
}

/// Trim, drop empties, drop repeats. Keeps first-seen order since match order is significant.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|x| x == t) {
            out.push(t.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_list_keeps_first_seen_order() {
        let v = vec![
            " 城投 ".to_string(),
            "".to_string(),
            "资产管理".to_string(),
            "城投".to_string(),
        ];
        assert_eq!(clean_list(v), vec!["城投".to_string(), "资产管理".to_string()]);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = MonitorConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.keywords.len(), 6);
        assert_eq!(cfg.regions.first().map(String::as_str), Some("深圳"));
        assert_eq!(cfg.primary_region, "深圳");
        assert_eq!(cfg.http.timeout_secs, 30);
        assert_eq!(cfg.message.per_tier_limit, 5);
        assert_eq!(cfg.sources.len(), 2);
        assert_eq!(cfg.sources[1].kind, SourceKind::Placeholder);
        assert_eq!(cfg.sources[0].query.get("pageSize").map(String::as_str), Some("20"));
    }

    #[test]
    fn no_keywords_is_rejected() {
        let err = MonitorConfig::from_toml_str(r#"keywords = ["  ", ""]"#).unwrap_err();
        assert!(err.to_string().contains("no keywords"));
    }

    #[test]
    fn primary_region_outside_regions_is_a_warning_not_an_error() {
        let cfg = MonitorConfig::from_toml_str(
            r#"
regions = ["广州", "东莞"]
primary_region = "深圳"
"#,
        )
        .unwrap();
        let w = cfg.warnings();
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("primary region 深圳 is not among configured regions"));
        assert!(MonitorConfig::default().warnings().is_empty());
    }

    #[test]
    fn source_defaults_fill_selectors_and_limit() {
        let cfg = MonitorConfig::from_toml_str(
            r#"
[[sources]]
name = "test"
url = "https://example.test/list"
"#,
        )
        .unwrap();
        assert_eq!(cfg.sources.len(), 1);
        let s = &cfg.sources[0];
        assert_eq!(s.kind, SourceKind::Listing);
        assert_eq!(s.limit, 10);
        assert_eq!(s.selectors, ListingSelectors::default());
    }
}
