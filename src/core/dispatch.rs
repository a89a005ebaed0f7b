use crate::domain::ports::Notifier;
use crate::utils::error::{Result, SantaError};
use crate::utils::logger::mask_phone;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_SEND_DELAY: Duration = Duration::from_secs(1);

/// 發送失敗時的處理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// 第一次失敗即中止，剩餘訊息不再發送
    #[default]
    Abort,
    /// 記錄失敗並繼續，結束時回報失敗數
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub giver: String,
    pub destination: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReceipt {
    pub giver: String,
    pub destination: String,
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
}

pub struct Dispatcher<N: Notifier> {
    notifier: N,
    delay: Duration,
    policy: FailurePolicy,
}

impl<N: Notifier> Dispatcher<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            delay: DEFAULT_SEND_DELAY,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn dispatch(&self, messages: &[OutboundMessage]) -> Result<Vec<DeliveryReceipt>> {
        self.dispatch_with(messages, |_| {}).await
    }

    /// 依序發送每則訊息，每次呼叫之間固定等待以符合服務的速率限制。
    /// `on_delivered` 在每則訊息成功送出後立即被呼叫，即使之後的發送失敗
    pub async fn dispatch_with<F>(
        &self,
        messages: &[OutboundMessage],
        mut on_delivered: F,
    ) -> Result<Vec<DeliveryReceipt>>
    where
        F: FnMut(&DeliveryReceipt) + Send,
    {
        tracing::info!("📨 Sending {} message(s)", messages.len());

        let mut receipts = Vec::with_capacity(messages.len());
        let mut failed = 0;

        for (index, message) in messages.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.notifier.send(&message.destination, &message.body).await {
                Ok(message_id) => {
                    tracing::info!(
                        "✅ SMS messaged {} <{}>",
                        message.giver,
                        mask_phone(&message.destination)
                    );
                    let receipt = DeliveryReceipt {
                        giver: message.giver.clone(),
                        destination: message.destination.clone(),
                        message_id,
                        sent_at: Utc::now(),
                    };
                    on_delivered(&receipt);
                    receipts.push(receipt);
                }
                Err(e) => match self.policy {
                    FailurePolicy::Abort => {
                        tracing::error!(
                            "❌ Delivery to {} failed, aborting {} remaining message(s)",
                            message.giver,
                            messages.len() - index - 1
                        );
                        return Err(e);
                    }
                    FailurePolicy::Continue => {
                        tracing::warn!("⚠️ Delivery to {} failed: {}", message.giver, e);
                        failed += 1;
                    }
                },
            }
        }

        if failed > 0 {
            return Err(SantaError::PartialDeliveryError {
                failed,
                total: messages.len(),
            });
        }

        Ok(receipts)
    }
}
