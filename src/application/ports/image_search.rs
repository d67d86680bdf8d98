//! Image Search Port - GIF 检索能力抽象

use async_trait::async_trait;
use thiserror::Error;

/// 图片检索错误
#[derive(Debug, Error)]
pub enum ImageSearchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 检索请求
#[derive(Debug, Clone)]
pub struct ImageSearchRequest {
    pub query: String,
    /// 最多返回的候选数
    pub limit: u32,
    /// 内容分级，如 "g"
    pub rating: String,
}

/// 单个检索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHit {
    /// 原图 URL
    pub url: String,
}

/// Image Search Port
#[async_trait]
pub trait ImageSearchPort: Send + Sync {
    async fn search(&self, request: ImageSearchRequest) -> Result<Vec<ImageHit>, ImageSearchError>;
}
