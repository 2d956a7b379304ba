use crate::utils::error::{CatalogError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use url::Url;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_JSON_PATCH: &str = "application/json-patch+json";

/// 單一 API 呼叫的請求組裝器
///
/// 依序：解析 URL 樣板 → 加入標頭與查詢參數 → 設定 JSON body → `build`。
/// 每個階段的失敗都帶著操作名稱回傳。
#[derive(Debug)]
pub struct RequestBuilder {
    operation: &'static str,
    method: Method,
    url: Option<Url>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(method: Method, operation: &'static str) -> Self {
        Self {
            operation,
            method,
            url: None,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// 將 `{name}` 佔位符替換為路徑參數並接到服務 URL 之後
    pub fn resolve_request_url(
        &mut self,
        service_url: &str,
        path_template: &str,
        path_params: &[(&str, &str)],
    ) -> Result<&Url> {
        let base = service_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(self.url_error("service URL is empty".to_string()));
        }

        let mut url = Url::parse(base)
            .map_err(|e| self.url_error(format!("invalid service URL '{}': {}", base, e)))?;

        let mut segments = Vec::new();
        for segment in path_template.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = path_params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            self.url_error(format!("path parameter '{}' is missing", name))
                        })?;
                    if value.is_empty() {
                        return Err(self.url_error(format!("path parameter '{}' is empty", name)));
                    }
                    segments.push(value);
                }
                None if segment.contains('{') || segment.contains('}') => {
                    return Err(self.url_error(format!(
                        "malformed placeholder '{}' in path template",
                        segment
                    )));
                }
                None => segments.push(segment),
            }
        }

        url.path_segments_mut()
            .map_err(|_| self.url_error(format!("service URL '{}' cannot be a base", base)))?
            .pop_if_empty()
            .extend(segments);

        tracing::trace!("{}: resolved URL {}", self.operation, url);
        Ok(self.url.insert(url))
    }

    /// 加入標頭；同名（不分大小寫）的既有標頭會被取代
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn add_query(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn add_optional_query<T: ToString>(&mut self, name: &str, value: Option<&T>) -> &mut Self {
        if let Some(value) = value {
            self.add_query(name, value.to_string());
        }
        self
    }

    pub fn set_body_content_json<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<&mut Self> {
        self.set_body_content(body, CONTENT_TYPE_JSON)
    }

    pub fn set_body_content<B: Serialize + ?Sized>(
        &mut self,
        body: &B,
        content_type: &str,
    ) -> Result<&mut Self> {
        let bytes = serde_json::to_vec(body).map_err(|source| CatalogError::SetJsonBody {
            operation: self.operation,
            source,
        })?;
        self.body = Some(bytes);
        self.add_header("Content-Type", content_type);
        Ok(self)
    }

    pub fn build(self, client: &Client) -> Result<reqwest::Request> {
        let operation = self.operation;
        let mut url = self.url.ok_or_else(|| CatalogError::Build {
            operation,
            message: "request URL has not been resolved".to_string(),
        })?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| CatalogError::Build {
                    operation,
                    message: format!("invalid header name '{}': {}", name, e),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| CatalogError::Build {
                operation,
                message: format!("invalid value for header '{}': {}", name, e),
            })?;
            headers.insert(header_name, header_value);
        }

        let mut request = client.request(self.method, url).headers(headers);
        if let Some(body) = self.body {
            request = request.body(body);
        }

        request.build().map_err(|e| CatalogError::Build {
            operation,
            message: e.to_string(),
        })
    }

    fn url_error(&self, message: String) -> CatalogError {
        CatalogError::UrlResolve {
            operation: self.operation,
            message,
        }
    }
}
