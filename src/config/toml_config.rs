use crate::adapters::http::DEFAULT_BASE_URL;
use crate::config::{DEFAULT_INGEST_WAIT_SECONDS, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::CarrierDescriptor;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TrackingError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub carriers: Vec<CarrierDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub ingest_wait_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_seconds: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrackingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRACKINGMORE_API_KEY})，找不到的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrackingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.provider.base_url
    }

    fn api_key(&self) -> &str {
        &self.provider.api_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn ingest_wait(&self) -> Duration {
        Duration::from_secs(
            self.tracking
                .ingest_wait_seconds
                .unwrap_or(DEFAULT_INGEST_WAIT_SECONDS),
        )
    }

    fn extra_carriers(&self) -> &[CarrierDescriptor] {
        &self.carriers
    }
}
