//! Tender monitor — binary entrypoint.
//! One invocation = one run; periodicity comes from an external scheduler.

use tender_monitor::{logging, MonitorConfig, Runner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; FEISHU_WEBHOOK usually lives there.
    let _ = dotenvy::dotenv();

    let config = MonitorConfig::load_default()?;
    logging::init(&config.output.log_file)?;

    let runner = Runner::from_config(config)?;
    let summary = runner.run().await?;

    tracing::debug!(
        high = summary.high,
        medium = summary.medium,
        delivered = summary.delivery.is_delivered(),
        "run summary"
    );
    Ok(())
}
