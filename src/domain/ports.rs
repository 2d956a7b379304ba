use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Request;

/// 為送出的請求加上認證資訊
///
/// `operation` 只用於錯誤訊息，實作不應依操作改變行為。
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug {
    fn auth_type(&self) -> &'static str;

    async fn authenticate(&self, request: &mut Request, operation: &'static str) -> Result<()>;
}
