use crate::config::{AuthSettings, ClientConfig, DEFAULT_SERVICE_URL};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSection {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CM_APIKEY})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn service_url(&self) -> &str {
        self.service.url.as_deref().unwrap_or(DEFAULT_SERVICE_URL)
    }

    /// 轉換為客戶端設定
    pub fn to_client_config(&self) -> Result<ClientConfig> {
        self.validate()?;

        let timeout = self.service.timeout_seconds.map(Duration::from_secs);
        Ok(ClientConfig {
            service_url: self.service_url().to_string(),
            authenticator: self.auth.build_authenticator("", timeout)?,
            default_headers: self.service.headers.clone().unwrap_or_default(),
            timeout,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.url", self.service_url())?;
        if let Some(seconds) = self.service.timeout_seconds {
            validate_range("service.timeout_seconds", seconds, 1, 3600)?;
        }
        Ok(())
    }
}
