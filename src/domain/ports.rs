use crate::utils::error::Result;
use async_trait::async_trait;

/// 簡訊發送服務。成功時回傳服務端的訊息 ID
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, destination: &str, body: &str) -> Result<String>;
}
