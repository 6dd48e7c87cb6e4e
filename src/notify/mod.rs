// src/notify/mod.rs
pub mod feishu;

pub use feishu::FeishuNotifier;

/// Result of one delivery attempt. Delivery problems are reported, never raised.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered,
    /// No webhook URL configured; nothing was sent.
    NotConfigured,
    Failed(anyhow::Error),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> DeliveryOutcome;
    fn name(&self) -> &'static str;
}
