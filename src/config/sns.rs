use crate::domain::ports::Notifier;
use crate::utils::error::{Result, SantaError};
use crate::utils::logger::mask_phone;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::config::Region;
use aws_sdk_sns::error::ProvideErrorMetadata;
use aws_sdk_sns::Client as SnsClient;

/// 直接發送簡訊到電話號碼 (無需訂閱主題)
#[derive(Debug, Clone)]
pub struct SnsNotifier {
    client: SnsClient,
}

impl SnsNotifier {
    pub fn new(client: SnsClient) -> Self {
        Self { client }
    }

    /// 使用指定的 AWS profile 與 region 建立客戶端
    pub async fn from_profile(profile: &str, region: &str) -> Result<Self> {
        validate_aws_region("aws_region", region)?;

        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .region(Region::new(region.to_string()))
            .load()
            .await;

        tracing::debug!("Created SNS client for profile {} in {}", profile, region);
        Ok(Self::new(SnsClient::new(&config)))
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn send(&self, destination: &str, body: &str) -> Result<String> {
        let result = self
            .client
            .publish()
            .phone_number(destination)
            .message(body)
            .send()
            .await;

        match result {
            Ok(output) => {
                let message_id = output.message_id().unwrap_or_default().to_string();
                tracing::info!("Published message to {}.", mask_phone(destination));
                Ok(message_id)
            }
            Err(err) => {
                let service_error = err.into_service_error();
                let reason = match (service_error.code(), service_error.message()) {
                    (Some(code), Some(message)) => format!("{}: {}", code, message),
                    (Some(code), None) => code.to_string(),
                    _ => service_error.to_string(),
                };
                tracing::error!(
                    "Couldn't publish message to {}: {}",
                    mask_phone(destination),
                    reason
                );
                Err(SantaError::DeliveryError {
                    destination: destination.to_string(),
                    reason,
                })
            }
        }
    }
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    use crate::utils::validation::validate_non_empty_string;

    validate_non_empty_string(field_name, region)?;

    // AWS region format validation
    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}
