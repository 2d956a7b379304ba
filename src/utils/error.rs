use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{operation}: invalid parameter '{field}': {reason}")]
    InvalidParameter {
        operation: &'static str,
        field: String,
        reason: String,
    },

    #[error("{operation}: failed to resolve request URL: {message}")]
    UrlResolve {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: failed to serialize JSON body: {source}")]
    SetJsonBody {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: failed to build request: {message}")]
    Build {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: authentication failed: {message}")]
    Authentication {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: HTTP request failed: {source}")]
    HttpRequest {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: HTTP {status}: {message}")]
    HttpStatus {
        operation: &'static str,
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("{operation}: failed to unmarshal response: {source}")]
    UnmarshalResponse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CatalogError {
    /// 錯誤發生的階段標籤
    pub fn stage(&self) -> &'static str {
        match self {
            CatalogError::InvalidParameter { .. } => "struct-validation-error",
            CatalogError::UrlResolve { .. } => "url-resolve-error",
            CatalogError::SetJsonBody { .. } => "set-json-body-error",
            CatalogError::Build { .. } => "build-error",
            CatalogError::Authentication { .. } => "authentication-error",
            CatalogError::HttpRequest { .. } | CatalogError::HttpStatus { .. } => {
                "http-request-err"
            }
            CatalogError::UnmarshalResponse { .. } => "unmarshal-resp-error",
            CatalogError::ConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::IoError(_) => "config-error",
        }
    }

    /// 觸發錯誤的 API 操作名稱（設定錯誤則無）
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            CatalogError::InvalidParameter { operation, .. }
            | CatalogError::UrlResolve { operation, .. }
            | CatalogError::SetJsonBody { operation, .. }
            | CatalogError::Build { operation, .. }
            | CatalogError::Authentication { operation, .. }
            | CatalogError::HttpRequest { operation, .. }
            | CatalogError::HttpStatus { operation, .. }
            | CatalogError::UnmarshalResponse { operation, .. } => Some(operation),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            CatalogError::HttpStatus { status, .. } => Some(*status),
            CatalogError::HttpRequest { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
