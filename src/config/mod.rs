#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_BASE_URL;
use crate::domain::model::CarrierDescriptor;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TrackingError};
use crate::utils::validation::{
    validate_carrier_code, validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_INGEST_WAIT_SECONDS: u64 = 2;

/// 啟動時組好一次、注入給服務的設定值
#[derive(Clone)]
pub struct ServiceSettings {
    pub api_base_url: String,
    pub api_key: String,
    /// Budget for the whole register/wait/fetch sequence.
    pub request_timeout: Duration,
    pub ingest_wait: Duration,
    pub extra_carriers: Vec<CarrierDescriptor>,
}

impl ServiceSettings {
    pub fn from_provider(config: &impl ConfigProvider) -> Self {
        Self {
            api_base_url: config.api_base_url().to_string(),
            api_key: config.api_key().to_string(),
            request_timeout: config.request_timeout(),
            ingest_wait: config.ingest_wait(),
            extra_carriers: config.extra_carriers().to_vec(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            ingest_wait: Duration::from_secs(DEFAULT_INGEST_WAIT_SECONDS),
            extra_carriers: Vec::new(),
        }
    }
}

impl fmt::Debug for ServiceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceSettings")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("request_timeout", &self.request_timeout)
            .field("ingest_wait", &self.ingest_wait)
            .field("extra_carriers", &self.extra_carriers)
            .finish()
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_url("provider.base_url", &self.api_base_url)?;

        if self.api_key.contains("${") {
            return Err(TrackingError::MissingConfigError {
                field: "provider.api_key".to_string(),
            });
        }
        validate_non_empty_string("provider.api_key", &self.api_key)?;

        validate_range(
            "provider.timeout_seconds",
            self.request_timeout.as_secs_f64(),
            1.0,
            300.0,
        )?;
        if self.ingest_wait >= self.request_timeout {
            return Err(TrackingError::InvalidConfigValueError {
                field: "tracking.ingest_wait_seconds".to_string(),
                value: format!("{:?}", self.ingest_wait),
                reason: "Ingest wait must be shorter than the request timeout".to_string(),
            });
        }

        for carrier in &self.extra_carriers {
            validate_carrier_code("carriers.code", &carrier.code)?;
            validate_non_empty_string("carriers.name", &carrier.display_name)?;
        }

        tracing::debug!("✅ Service configuration validation passed");
        Ok(())
    }
}

/// 從環境變數讀取設定，沒有設定檔時使用
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub ingest_wait_seconds: u64,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: env::var("TRACKINGMORE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: env::var("TRACKINGMORE_API_KEY").unwrap_or_default(),
            timeout_seconds: seconds_from_env("DAKDASH_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?,
            ingest_wait_seconds: seconds_from_env(
                "DAKDASH_INGEST_WAIT_SECONDS",
                DEFAULT_INGEST_WAIT_SECONDS,
            )?,
        })
    }
}

fn seconds_from_env(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| TrackingError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "Expected a whole number of seconds".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

impl ConfigProvider for EnvConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn ingest_wait(&self) -> Duration {
        Duration::from_secs(self.ingest_wait_seconds)
    }

    fn extra_carriers(&self) -> &[CarrierDescriptor] {
        &[]
    }
}
