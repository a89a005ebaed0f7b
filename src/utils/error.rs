use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Required parameter {field} not in config file")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Not enough participants: found {found}, need at least 2")]
    NotEnoughParticipants { found: usize },

    #[error("Target pool has {targets} entries but there are {participants} participants")]
    PoolSizeMismatch { participants: usize, targets: usize },

    #[error("Participant '{participant}' has no legal target")]
    InfeasibleAssignment { participant: String },

    #[error("No complete assignment satisfies every exclusion")]
    NoCompleteAssignment,

    #[error("Failed to deliver message to {destination}: {reason}")]
    DeliveryError { destination: String, reason: String },

    #[error("{failed} of {total} messages could not be delivered")]
    PartialDeliveryError { failed: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Delivery,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
            Self::DeliveryError { .. } | Self::PartialDeliveryError { .. } => {
                ErrorCategory::Delivery
            }
            _ => ErrorCategory::Configuration,
        }
    }

    /// 是否屬於配置類錯誤 (在任何發送前就會失敗)
    pub fn is_config_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應的程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read a required file: {}", e),
            Self::MissingConfigError { field } => {
                format!("The config file is missing the {} section", field)
            }
            Self::NotEnoughParticipants { found } => format!(
                "A draw needs at least 2 participants, the config lists {}",
                found
            ),
            Self::InfeasibleAssignment { participant } => format!(
                "{} excludes every possible match, so no draw is possible",
                participant
            ),
            Self::NoCompleteAssignment => {
                "The dont_pair lists leave no way to match everyone".to_string()
            }
            Self::DeliveryError { destination, .. } => {
                format!(
                    "Sending the SMS to {} failed",
                    crate::utils::logger::mask_phone(destination)
                )
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the config path exists and is readable",
            Self::SerializationError(_) => "Report this output error with the config used",
            Self::MissingConfigError { .. } => {
                "Add PARTICIPANTS and MESSAGE to the config file"
            }
            Self::NotEnoughParticipants { .. } => "Add more PARTICIPANTS to the config file",
            Self::PoolSizeMismatch { .. } => {
                "List exactly one CATEGORIES entry per participant"
            }
            Self::InfeasibleAssignment { .. } | Self::NoCompleteAssignment => {
                "Relax the dont_pair lists in the config file"
            }
            Self::DeliveryError { .. } | Self::PartialDeliveryError { .. } => {
                "Check the AWS profile, region and SNS SMS sandbox settings, then rerun"
            }
            _ => "Fix the config file and rerun",
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_errors_are_config_errors() {
        assert!(SantaError::NotEnoughParticipants { found: 1 }.is_config_error());
        assert!(SantaError::NoCompleteAssignment.is_config_error());
        assert!(SantaError::PoolSizeMismatch {
            participants: 3,
            targets: 2
        }
        .is_config_error());
        assert!(SantaError::InfeasibleAssignment {
            participant: "A".to_string()
        }
        .is_config_error());
    }

    #[test]
    fn test_exit_codes_by_category() {
        let delivery = SantaError::DeliveryError {
            destination: "+15550100".to_string(),
            reason: "throttled".to_string(),
        };
        assert_eq!(delivery.category(), ErrorCategory::Delivery);
        assert_eq!(delivery.exit_code(), 2);
        assert_eq!(SantaError::NoCompleteAssignment.exit_code(), 1);

        let io = SantaError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.category(), ErrorCategory::System);
        assert_eq!(io.exit_code(), 3);
    }

    #[test]
    fn test_missing_key_message() {
        let err = SantaError::MissingConfigError {
            field: "MESSAGE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Required parameter MESSAGE not in config file"
        );
    }
}
