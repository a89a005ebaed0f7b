use crate::domain::model::{MatchMode, Participant, Target, TargetPool};
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{
    validate_non_empty_string, validate_phone_number, validate_required_field, validate_unique,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SantaConfig {
    #[serde(rename = "PARTICIPANTS")]
    pub participants: Option<Vec<ParticipantConfig>>,
    #[serde(rename = "MESSAGE")]
    pub message: Option<String>,
    #[serde(rename = "CATEGORIES", default)]
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantConfig {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub dont_pair: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// 依副檔名判斷格式，預設為 YAML
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl SantaConfig {
    /// 從檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SantaError::IoError)?;
        Self::from_str_with_format(&content, ConfigFormat::from_path(&path))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, ConfigFormat::Yaml)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, ConfigFormat::Toml)
    }

    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        let config: Self = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(&processed_content).map_err(|e| {
                SantaError::ConfigValidationError {
                    field: "yaml_parsing".to_string(),
                    message: format!("YAML parsing error: {}", e),
                }
            })?,
            ConfigFormat::Toml => toml::from_str(&processed_content).map_err(|e| {
                SantaError::ConfigValidationError {
                    field: "toml_parsing".to_string(),
                    message: format!("TOML parsing error: {}", e),
                }
            })?,
        };

        tracing::debug!(
            "Parsed {:?} config with {} participant(s)",
            format,
            config.participants.as_ref().map_or(0, Vec::len)
        );
        Ok(config)
    }

    /// 替換環境變數 (例如 ${SANTA_PHONE_ANN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn mode(&self) -> MatchMode {
        if self.categories.is_some() {
            MatchMode::Categories
        } else {
            MatchMode::Pairs
        }
    }

    pub fn participant_entries(&self) -> Result<&[ParticipantConfig]> {
        validate_required_field("PARTICIPANTS", &self.participants).map(Vec::as_slice)
    }

    pub fn message_template(&self) -> Result<&str> {
        validate_required_field("MESSAGE", &self.message).map(String::as_str)
    }

    pub fn participants(&self) -> Result<Vec<Participant>> {
        Ok(self
            .participant_entries()?
            .iter()
            .map(|entry| {
                Participant::new(
                    entry.name.trim(),
                    entry.phone.trim(),
                    entry.dont_pair.iter().map(|name| name.trim().to_string()),
                )
            })
            .collect())
    }

    /// 建立目標池: 類別模式使用 CATEGORIES，否則為參與者本身
    pub fn target_pool(&self, participants: &[Participant]) -> Vec<Target> {
        match &self.categories {
            Some(categories) => {
                let labels: Vec<&str> = categories.iter().map(|label| label.trim()).collect();
                TargetPool::categories(labels.as_slice())
            }
            None => TargetPool::receivers(participants),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        let entries = self.participant_entries()?;
        let message = self.message_template()?;

        if entries.len() < 2 {
            return Err(SantaError::NotEnoughParticipants {
                found: entries.len(),
            });
        }

        for (index, entry) in entries.iter().enumerate() {
            validate_non_empty_string(&format!("PARTICIPANTS[{}].name", index), &entry.name)?;
            validate_phone_number(&format!("PARTICIPANTS[{}].phone", index), entry.phone.trim())?;
        }
        validate_unique("PARTICIPANTS.name", entries.iter().map(|e| e.name.trim()))?;

        validate_non_empty_string("MESSAGE", message)?;

        if let Some(categories) = &self.categories {
            if categories.len() != entries.len() {
                return Err(SantaError::PoolSizeMismatch {
                    participants: entries.len(),
                    targets: categories.len(),
                });
            }
            for (index, category) in categories.iter().enumerate() {
                validate_non_empty_string(&format!("CATEGORIES[{}]", index), category)?;
            }
        }

        Ok(())
    }
}

impl Validate for SantaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
