#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::auth::{
    BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator, NoAuthAuthenticator,
    DEFAULT_IAM_URL,
};
use crate::domain::ports::Authenticator;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_range, validate_required_field, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "https://cm.globalcatalog.cloud.ibm.com/api/v1-beta";
pub const DEFAULT_SERVICE_NAME: &str = "catalog_management";

/// 建立客戶端所需的設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub service_url: String,
    pub authenticator: Arc<dyn Authenticator>,
    pub default_headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(authenticator: impl Authenticator + 'static) -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            authenticator: Arc::new(authenticator),
            default_headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 從環境變數載入（前綴 `CATALOG_MANAGEMENT_`）
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(DEFAULT_SERVICE_NAME, |key| std::env::var(key).ok())
    }

    /// 以自訂查詢函式讀取 `<SERVICE>_URL`、`<SERVICE>_AUTH_TYPE` 等變數
    pub fn from_env_with<F>(service_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let var = |suffix: &str| {
            lookup(&format!("{}_{}", prefix, suffix)).filter(|value| !value.trim().is_empty())
        };

        let auth = AuthSettings {
            auth_type: var("AUTH_TYPE"),
            apikey: var("APIKEY"),
            url: var("AUTH_URL"),
            bearer_token: var("BEARER_TOKEN"),
            username: var("USERNAME"),
            password: var("PASSWORD"),
        };

        let timeout = match var("TIMEOUT_SECONDS") {
            Some(raw) => {
                let seconds: u64 =
                    raw.trim().parse().map_err(|_| CatalogError::InvalidConfigValueError {
                        field: format!("{}_TIMEOUT_SECONDS", prefix),
                        value: raw.clone(),
                        reason: "must be a whole number of seconds".to_string(),
                    })?;
                Some(Duration::from_secs(seconds))
            }
            None => None,
        };

        let config = ClientConfig {
            service_url: var("URL").unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            authenticator: auth.build_authenticator(&prefix, timeout)?,
            default_headers: HashMap::new(),
            timeout,
        };

        tracing::debug!(
            "Loaded {} configuration from environment (auth type: {})",
            service_name,
            config.authenticator.auth_type()
        );
        config.validate()?;
        Ok(config)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service_url", &self.service_url)?;
        if let Some(timeout) = self.timeout {
            validate_range("timeout_seconds", timeout.as_secs(), 1, 3600)?;
        }
        Ok(())
    }
}

/// 認證設定，環境變數與 TOML 共用
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(rename = "type")]
    pub auth_type: Option<String>,
    pub apikey: Option<String>,
    pub url: Option<String>,
    pub bearer_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthSettings {
    /// 未指定類型時預設為 IAM；`field_prefix` 為空時錯誤訊息使用 TOML 欄位名稱
    ///
    /// `timeout` 同時套用在 IAM token 交換上。
    pub fn build_authenticator(
        &self,
        field_prefix: &str,
        timeout: Option<Duration>,
    ) -> Result<Arc<dyn Authenticator>> {
        let field = |name: &str| {
            if field_prefix.is_empty() {
                format!("auth.{}", name.to_lowercase())
            } else {
                format!("{}_{}", field_prefix, name)
            }
        };
        let auth_type = self
            .auth_type
            .as_deref()
            .unwrap_or("iam")
            .to_ascii_lowercase();

        let authenticator: Arc<dyn Authenticator> = match auth_type.as_str() {
            "iam" => {
                let apikey = validate_required_field(&field("APIKEY"), &self.apikey)?;
                let url = self.url.as_deref().unwrap_or(DEFAULT_IAM_URL);
                let mut iam = IamAuthenticator::with_url(apikey.clone(), url)?;
                if let Some(timeout) = timeout {
                    iam = iam.with_timeout(timeout)?;
                }
                Arc::new(iam)
            }
            "bearertoken" => {
                let token = validate_required_field(&field("BEARER_TOKEN"), &self.bearer_token)?;
                Arc::new(BearerTokenAuthenticator::new(token.clone())?)
            }
            "basic" => {
                let username = validate_required_field(&field("USERNAME"), &self.username)?;
                let password = validate_required_field(&field("PASSWORD"), &self.password)?;
                Arc::new(BasicAuthenticator::new(username.clone(), password.clone())?)
            }
            "noauth" => Arc::new(NoAuthAuthenticator),
            other => {
                return Err(CatalogError::InvalidConfigValueError {
                    field: field("AUTH_TYPE"),
                    value: other.to_string(),
                    reason: "supported types: iam, bearertoken, basic, noauth".to_string(),
                })
            }
        };

        Ok(authenticator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_env_defaults_to_iam() {
        let config = ClientConfig::from_env_with(
            "catalog_management",
            lookup(&[("CATALOG_MANAGEMENT_APIKEY", "my-key")]),
        )
        .unwrap();

        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.authenticator.auth_type(), "iam");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_from_env_bearer_with_url_and_timeout() {
        let config = ClientConfig::from_env_with(
            "catalog_management",
            lookup(&[
                ("CATALOG_MANAGEMENT_AUTH_TYPE", "BearerToken"),
                ("CATALOG_MANAGEMENT_BEARER_TOKEN", "tok"),
                ("CATALOG_MANAGEMENT_URL", "http://localhost:9000/api"),
                ("CATALOG_MANAGEMENT_TIMEOUT_SECONDS", "15"),
            ]),
        )
        .unwrap();

        assert_eq!(config.authenticator.auth_type(), "bearertoken");
        assert_eq!(config.service_url, "http://localhost:9000/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_from_env_timeout_applies_to_iam_token_exchange() {
        let config = ClientConfig::from_env_with(
            "catalog_management",
            lookup(&[
                ("CATALOG_MANAGEMENT_APIKEY", "my-key"),
                ("CATALOG_MANAGEMENT_TIMEOUT_SECONDS", "15"),
            ]),
        )
        .unwrap();

        assert!(format!("{:?}", config.authenticator).contains("timeout: 15s"));
    }

    #[test]
    fn test_from_env_missing_credentials() {
        let err = ClientConfig::from_env_with("catalog_management", lookup(&[])).unwrap_err();
        match err {
            CatalogError::MissingConfigError { field } => {
                assert_eq!(field, "CATALOG_MANAGEMENT_APIKEY")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_env_rejects_unknown_auth_type_and_bad_timeout() {
        assert!(ClientConfig::from_env_with(
            "catalog_management",
            lookup(&[("CATALOG_MANAGEMENT_AUTH_TYPE", "kerberos")]),
        )
        .is_err());

        assert!(ClientConfig::from_env_with(
            "catalog_management",
            lookup(&[
                ("CATALOG_MANAGEMENT_AUTH_TYPE", "noauth"),
                ("CATALOG_MANAGEMENT_TIMEOUT_SECONDS", "soon"),
            ]),
        )
        .is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig::new(NoAuthAuthenticator).with_service_url("ftp://example.com");
        assert!(config.validate().is_err());
    }
}
