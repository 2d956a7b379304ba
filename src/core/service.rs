use crate::core::request::RequestBuilder;
use crate::domain::ports::Authenticator;
use crate::utils::error::{CatalogError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const SDK_NAME: &str = "catalog-mgmt-rust-sdk";
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 每個請求都帶的 SDK 標頭（User-Agent 與分析標頭）
pub fn sdk_headers(
    service_name: &str,
    service_version: &str,
    operation_id: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("User-Agent", format!("{}/{}", SDK_NAME, SDK_VERSION)),
        (
            "X-IBMCloud-SDK-Analytics",
            format!(
                "service_name={};service_version={};operation_id={}",
                service_name, service_version, operation_id
            ),
        ),
    ]
}

/// API 回應：狀態碼、標頭與（可能為空的）結果
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub result: Option<T>,
}

impl<T> DetailedResponse<T> {
    pub fn into_result(self) -> Option<T> {
        self.result
    }

    /// 依名稱（不分大小寫）取得回應標頭
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub url: String,
    pub authenticator: Arc<dyn Authenticator>,
    pub default_headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

/// 所有 API 操作共用的 HTTP 服務
///
/// 複製成本很低：`reqwest::Client` 與認證器都是共享的。
#[derive(Debug, Clone)]
pub struct BaseService {
    client: Client,
    options: ServiceOptions,
}

impl BaseService {
    pub fn new(options: ServiceOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| CatalogError::ConfigError {
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self::with_client(client, options))
    }

    pub fn with_client(client: Client, mut options: ServiceOptions) -> Self {
        options.url = normalize_service_url(&options.url);
        Self { client, options }
    }

    pub fn service_url(&self) -> &str {
        &self.options.url
    }

    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        crate::utils::validation::validate_url("service_url", url)?;
        self.options.url = normalize_service_url(url);
        Ok(())
    }

    pub fn set_default_headers(&mut self, headers: HashMap<String, String>) {
        self.options.default_headers = headers;
    }

    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.options.default_headers
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.options.authenticator
    }

    pub fn request_builder(&self, method: Method, operation: &'static str) -> RequestBuilder {
        RequestBuilder::new(method, operation)
    }

    /// 送出請求並將 JSON 回應解析為 `T`；空回應得到 `result: None`
    pub async fn request<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<DetailedResponse<T>> {
        let operation = builder.operation();
        let (status_code, headers, body) = self.send(builder).await?;

        let result = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            let value = serde_json::from_slice(&body)
                .map_err(|source| CatalogError::UnmarshalResponse { operation, source })?;
            Some(value)
        };

        Ok(DetailedResponse {
            status_code,
            headers,
            result,
        })
    }

    /// 送出不預期回應內容的請求（例如 DELETE）
    pub async fn request_no_content(&self, builder: RequestBuilder) -> Result<DetailedResponse<()>> {
        let (status_code, headers, _) = self.send(builder).await?;
        Ok(DetailedResponse {
            status_code,
            headers,
            result: None,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<(u16, HeaderMap, Vec<u8>)> {
        let operation = builder.operation();
        let mut request = builder.build(&self.client)?;

        self.options
            .authenticator
            .authenticate(&mut request, operation)
            .await?;

        for (name, value) in &self.options.default_headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| CatalogError::Build {
                    operation,
                    message: format!("invalid default header name '{}': {}", name, e),
                })?;
            if request.headers().contains_key(&header_name) {
                continue;
            }
            let header_value = HeaderValue::from_str(value).map_err(|e| CatalogError::Build {
                operation,
                message: format!("invalid value for default header '{}': {}", name, e),
            })?;
            request.headers_mut().insert(header_name, header_value);
        }

        tracing::debug!(
            "{}: {} {}",
            operation,
            request.method(),
            request.url()
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| CatalogError::HttpRequest { operation, source })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| CatalogError::HttpRequest { operation, source })?;

        tracing::debug!("{}: response status {}", operation, status);

        if !status.is_success() {
            let parsed: Option<serde_json::Value> = serde_json::from_slice(&body).ok();
            let message = parsed
                .as_ref()
                .and_then(extract_error_message)
                .unwrap_or_else(|| {
                    let text = String::from_utf8_lossy(&body).trim().to_string();
                    if text.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("unknown error")
                            .to_string()
                    } else {
                        text
                    }
                });

            tracing::warn!("{}: request failed with status {}: {}", operation, status, message);
            return Err(CatalogError::HttpStatus {
                operation,
                status: status.as_u16(),
                message,
                body: parsed,
            });
        }

        Ok((status.as_u16(), headers, body.to_vec()))
    }
}

fn normalize_service_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// 從錯誤回應中找出可讀的錯誤訊息
fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    let from_errors = body
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("message"))
        .and_then(|m| m.as_str());

    from_errors
        .or_else(|| body.get("error").and_then(|m| m.as_str()))
        .or_else(|| body.get("message").and_then(|m| m.as_str()))
        .or_else(|| body.get("errorMessage").and_then(|m| m.as_str()))
        .map(str::to_string)
}
