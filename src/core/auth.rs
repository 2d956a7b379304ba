use crate::domain::ports::Authenticator;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";
const IAM_TOKEN_PATH: &str = "/identity/token";
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
pub const DEFAULT_IAM_TIMEOUT: Duration = Duration::from_secs(30);

fn set_authorization(request: &mut Request, value: &str, operation: &'static str) -> Result<()> {
    let mut header = HeaderValue::from_str(value).map_err(|e| CatalogError::Authentication {
        operation,
        message: format!("invalid Authorization header: {}", e),
    })?;
    header.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, header);
    Ok(())
}

/// 不加任何認證（本機測試或代理後方使用）
#[derive(Debug, Clone, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn auth_type(&self) -> &'static str {
        "noauth"
    }

    async fn authenticate(&self, _request: &mut Request, _operation: &'static str) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        crate::utils::validation::validate_non_empty_string("bearer_token", &token)?;
        Ok(Self { token })
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"***")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn auth_type(&self) -> &'static str {
        "bearertoken"
    }

    async fn authenticate(&self, request: &mut Request, operation: &'static str) -> Result<()> {
        set_authorization(request, &format!("Bearer {}", self.token), operation)
    }
}

#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        crate::utils::validation::validate_non_empty_string("username", &username)?;
        crate::utils::validation::validate_non_empty_string("password", &password)?;
        if username.contains(':') {
            return Err(CatalogError::InvalidConfigValueError {
                field: "username".to_string(),
                value: username,
                reason: "username cannot contain ':'".to_string(),
            });
        }
        Ok(Self { username, password })
    }
}

impl std::fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn auth_type(&self) -> &'static str {
        "basic"
    }

    async fn authenticate(&self, request: &mut Request, operation: &'static str) -> Result<()> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        set_authorization(request, &format!("Basic {}", encoded), operation)
    }
}

fn iam_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::ConfigError {
            message: format!("failed to create IAM HTTP client: {}", e),
        })
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

/// 以 API key 向 IAM 交換 access token
///
/// Token 會快取到有效期的 80%，之後下一個請求會重新交換。
pub struct IamAuthenticator {
    apikey: String,
    url: String,
    client: Client,
    timeout: Duration,
    token: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    pub fn new(apikey: impl Into<String>) -> Result<Self> {
        Self::with_url(apikey, DEFAULT_IAM_URL)
    }

    pub fn with_url(apikey: impl Into<String>, url: &str) -> Result<Self> {
        let apikey = apikey.into();
        crate::utils::validation::validate_non_empty_string("apikey", &apikey)?;
        crate::utils::validation::validate_url("auth_url", url)?;

        Ok(Self {
            apikey,
            url: url.trim_end_matches('/').to_string(),
            client: iam_client(DEFAULT_IAM_TIMEOUT)?,
            timeout: DEFAULT_IAM_TIMEOUT,
            token: Mutex::new(None),
        })
    }

    /// token 交換的逾時；逾時時請求以 `authentication-error` 失敗
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = iam_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    async fn request_token(&self, operation: &'static str) -> Result<CachedToken> {
        let token_url = format!("{}{}", self.url, IAM_TOKEN_PATH);
        tracing::info!("Requesting IAM access token from {}", token_url);

        let response = self
            .client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", self.apikey.as_str())])
            .send()
            .await
            .map_err(|e| CatalogError::Authentication {
                operation,
                message: format!("IAM token request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Authentication {
                operation,
                message: format!("IAM token request returned {}: {}", status, text.trim()),
            });
        }

        let token: IamTokenResponse =
            response.json().await.map_err(|e| CatalogError::Authentication {
                operation,
                message: format!("invalid IAM token response: {}", e),
            })?;

        let lifetime = Duration::from_secs(token.expires_in.saturating_mul(8) / 10);
        Ok(CachedToken {
            access_token: token.access_token,
            refresh_at: Instant::now() + lifetime,
        })
    }
}

impl std::fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("apikey", &"***")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn auth_type(&self) -> &'static str {
        "iam"
    }

    async fn authenticate(&self, request: &mut Request, operation: &'static str) -> Result<()> {
        let mut cached = self.token.lock().await;

        let needs_refresh = cached
            .as_ref()
            .map(|token| Instant::now() >= token.refresh_at)
            .unwrap_or(true);
        if needs_refresh {
            *cached = Some(self.request_token(operation).await?);
        }

        let access_token = cached
            .as_ref()
            .map(|token| token.access_token.as_str())
            .unwrap_or_default();
        set_authorization(request, &format!("Bearer {}", access_token), operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn request() -> Request {
        Request::new(Method::GET, "https://cm.example.com/catalogs".parse().unwrap())
    }

    #[tokio::test]
    async fn test_bearer_token_sets_header() {
        let auth = BearerTokenAuthenticator::new("token-123").unwrap();
        let mut req = request();
        auth.authenticate(&mut req, "get_catalog").await.unwrap();

        assert_eq!(req.headers()[AUTHORIZATION], "Bearer token-123");
        assert!(!format!("{:?}", auth).contains("token-123"));
    }

    #[tokio::test]
    async fn test_basic_auth_encodes_credentials() {
        let auth = BasicAuthenticator::new("user", "pass").unwrap();
        let mut req = request();
        auth.authenticate(&mut req, "get_catalog").await.unwrap();

        assert_eq!(req.headers()[AUTHORIZATION], "Basic dXNlcjpwYXNz");
    }

    #[tokio::test]
    async fn test_no_auth_leaves_request_untouched() {
        let mut req = request();
        NoAuthAuthenticator.authenticate(&mut req, "get_catalog").await.unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_constructors_validate_credentials() {
        assert!(BearerTokenAuthenticator::new("").is_err());
        assert!(BasicAuthenticator::new("us:er", "pass").is_err());
        assert!(IamAuthenticator::new(" ").is_err());
        assert!(IamAuthenticator::with_url("key", "not-a-url").is_err());
    }
}
