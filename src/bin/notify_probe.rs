//! Sends a sample digest through the configured webhook to check wiring.

use chrono::Local;
use tender_monitor::{
    report::format_message, DeliveryOutcome, FeishuNotifier, MonitorConfig, Notifier, Priority,
    TenderRecord, Tiers,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = MonitorConfig::load_default()?;
    let notifier = FeishuNotifier::from_config(&cfg);

    let tiers = Tiers {
        high: vec![TenderRecord {
            source: "probe".into(),
            title: "【测试】深圳产业园招商及资产管理项目".into(),
            link: "https://example.com/probe".into(),
            date: Local::now().format("%Y-%m-%d").to_string(),
            keywords: vec!["资产管理".into(), "产业园招商".into()],
            region: Some(cfg.primary_region.clone()),
            priority: Priority::High,
        }],
        medium: vec![],
    };
    let message = format_message(&tiers, Local::now().date_naive(), &cfg.message);

    match notifier.send(&message).await {
        DeliveryOutcome::Delivered => println!("notify-probe: delivered"),
        DeliveryOutcome::NotConfigured => println!("notify-probe: {} not set", cfg.webhook_env),
        DeliveryOutcome::Failed(e) => println!("notify-probe: failed: {e:#}"),
    }
    Ok(())
}
