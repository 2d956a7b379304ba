//! Catalog management API 客戶端
//!
//! 每個操作都是同一個流程：路徑參數 → URL 樣板 → 標頭 → JSON body → 送出 → 解析回應。
//! 操作依資源分檔：目錄、產品、版本、方案。

mod catalogs;
mod offerings;
mod plans;
mod versions;

pub use catalogs::*;
pub use offerings::*;
pub use plans::*;
pub use versions::*;

use crate::config::{ClientConfig, DEFAULT_SERVICE_NAME};
use crate::core::request::RequestBuilder;
use crate::core::service::{sdk_headers, BaseService, ServiceOptions};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_param, Validate};
use reqwest::Method;
use std::collections::HashMap;

pub const SERVICE_VERSION: &str = "V1";

/// 為 `*Options` 產生 `with_header`
macro_rules! impl_with_header {
    ($($options:ty),+ $(,)?) => {
        $(
            impl $options {
                /// 加入此請求專用的標頭
                pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                    self.headers.insert(name.into(), value.into());
                    self
                }
            }
        )+
    };
}
pub(crate) use impl_with_header;

#[derive(Debug, Clone)]
pub struct CatalogManagementV1 {
    service: BaseService,
}

impl CatalogManagementV1 {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let service = BaseService::new(ServiceOptions {
            url: config.service_url,
            authenticator: config.authenticator,
            default_headers: config.default_headers,
            timeout: config.timeout,
        })?;

        tracing::info!(
            "Catalog management client ready: {} (auth: {})",
            service.service_url(),
            service.authenticator().auth_type()
        );
        Ok(Self { service })
    }

    /// 使用 `CATALOG_MANAGEMENT_*` 環境變數建立客戶端
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn service_url(&self) -> &str {
        self.service.service_url()
    }

    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        self.service.set_service_url(url)
    }

    pub fn set_default_headers(&mut self, headers: HashMap<String, String>) {
        self.service.set_default_headers(headers);
    }

    /// 檢查必要參數、解析 URL 並加上呼叫端與 SDK 標頭
    ///
    /// SDK 標頭與 `Accept` 在呼叫端標頭之後加入，同名時以 SDK 為準。
    fn prepare(
        &self,
        method: Method,
        operation: &'static str,
        operation_id: &'static str,
        path_template: &str,
        path_params: &[(&str, &str)],
        headers: &HashMap<String, String>,
    ) -> Result<RequestBuilder> {
        for (name, value) in path_params {
            validate_required_param(operation, name, value)?;
        }

        let mut builder = self.service.request_builder(method, operation);
        builder.resolve_request_url(self.service.service_url(), path_template, path_params)?;

        for (name, value) in headers {
            builder.add_header(name.as_str(), value.as_str());
        }
        for (name, value) in sdk_headers(DEFAULT_SERVICE_NAME, SERVICE_VERSION, operation_id) {
            builder.add_header(name, value);
        }
        builder.add_header("Accept", "application/json");

        Ok(builder)
    }
}
