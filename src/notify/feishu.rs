use anyhow::{bail, Context, Result};
use metrics::counter;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{DeliveryOutcome, Notifier};
use crate::config::MonitorConfig;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_WEBHOOK_ENV: &str = "FEISHU_WEBHOOK";

#[derive(Serialize)]
struct MarkdownContent<'a> {
    markdown: &'a str,
}

#[derive(Serialize)]
struct FeishuPayload<'a> {
    msg_type: &'static str,
    content: MarkdownContent<'a>,
}

impl<'a> FeishuPayload<'a> {
    fn markdown(text: &'a str) -> Self {
        Self {
            msg_type: "markdown",
            content: MarkdownContent { markdown: text },
        }
    }
}

/// Feishu answers 200 even for rejected messages; `code != 0` means rejected.
#[derive(Deserialize)]
struct FeishuReply {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
}

pub struct FeishuNotifier {
    webhook_url: Option<String>,
    /// Env var the URL was looked up in; named in the "not set" error.
    webhook_env: String,
    client: Client,
    timeout: Duration,
}

impl FeishuNotifier {
    pub fn from_config(cfg: &MonitorConfig) -> Self {
        let mut n = Self::with_url(cfg.webhook_url.clone()).with_timeout(cfg.http.timeout_secs);
        n.webhook_env = cfg.webhook_env.clone();
        n
    }

    /// Optional builder for tests/tools
    pub fn new(url: String) -> Self {
        Self::with_url(Some(url))
    }

    fn with_url(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            webhook_env: DEFAULT_WEBHOOK_ENV.to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn post(&self, url: &str, message: &str) -> Result<()> {
        let rsp = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&FeishuPayload::markdown(message))
            .send()
            .await
            .context("feishu post")?
            .error_for_status()
            .context("feishu non-2xx")?;

        // Non-JSON bodies are taken as accepted.
        let body = rsp.text().await.context("feishu reply body")?;
        if let Ok(reply) = serde_json::from_str::<FeishuReply>(&body) {
            if reply.code != 0 {
                bail!("feishu rejected message: code={} msg={}", reply.code, reply.msg);
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for FeishuNotifier {
    async fn send(&self, message: &str) -> DeliveryOutcome {
        let Some(url) = &self.webhook_url else {
            tracing::error!("{} not set", self.webhook_env);
            return DeliveryOutcome::NotConfigured;
        };

        counter!("tender_notify_total").increment(1);
        match self.post(url, message).await {
            Ok(()) => {
                tracing::info!("Message sent to Feishu successfully");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::error!("Send to Feishu error: {e:#}");
                DeliveryOutcome::Failed(e)
            }
        }
    }

    fn name(&self) -> &'static str {
        "feishu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape_matches_feishu_markdown() {
        let v = serde_json::to_value(FeishuPayload::markdown("**hi**")).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"msg_type": "markdown", "content": {"markdown": "**hi**"}})
        );
    }

    #[tokio::test]
    async fn unset_webhook_sends_nothing() {
        let n = FeishuNotifier::with_url(None);
        assert!(!n.is_configured());
        assert!(matches!(n.send("x").await, DeliveryOutcome::NotConfigured));
    }

    #[test]
    fn webhook_env_name_follows_config() {
        let cfg = MonitorConfig {
            webhook_env: "TEAM_HOOK".to_string(),
            ..MonitorConfig::default()
        };
        let n = FeishuNotifier::from_config(&cfg);
        assert!(!n.is_configured());
        assert_eq!(n.webhook_env, "TEAM_HOOK");
        assert_eq!(FeishuNotifier::new("http://h.test".into()).webhook_env, "FEISHU_WEBHOOK");
    }
}
