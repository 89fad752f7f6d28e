use crate::core::ConfigProvider;
use crate::domain::model::{RetryPolicy, TransportSettings};
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8112/api/v1/employee";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub upstream: UpstreamConfig,
    pub retry: Option<RetryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub connect_timeout_seconds: Option<u64>,
    pub read_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    pub base_delay_ms: Option<u64>,
    pub multiplier: Option<f64>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                connect_timeout_seconds: None,
                read_timeout_seconds: None,
            },
            retry: None,
        }
    }
}

impl DirectoryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EMPLOYEE_API_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DirectoryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.upstream.base_url = base_url.into();
        self
    }

    fn retry_config(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        validate_url("upstream.base_url", &self.upstream.base_url)?;

        if let Some(seconds) = self.upstream.connect_timeout_seconds {
            validate_positive_number("upstream.connect_timeout_seconds", seconds, 1)?;
        }
        if let Some(seconds) = self.upstream.read_timeout_seconds {
            validate_positive_number("upstream.read_timeout_seconds", seconds, 1)?;
        }

        if let Some(multiplier) = self.retry_config().multiplier {
            if !(multiplier >= 1.0 && multiplier.is_finite()) {
                return Err(DirectoryError::ValidationFailure {
                    field: "retry.multiplier".to_string(),
                    value: multiplier.to_string(),
                    reason: "Multiplier must be a finite number of at least 1".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for DirectoryConfig {
    fn base_url(&self) -> &str {
        &self.upstream.base_url
    }

    fn transport_settings(&self) -> TransportSettings {
        let defaults = TransportSettings::default();
        TransportSettings {
            connect_timeout: self
                .upstream
                .connect_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            read_timeout: self
                .upstream
                .read_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.read_timeout),
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        let retry = self.retry_config();
        RetryPolicy::new(
            retry
                .base_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.base_delay()),
            retry.multiplier.unwrap_or(defaults.multiplier()),
        )
    }
}
