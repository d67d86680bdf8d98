//! Text Generator Port - 文本生成能力抽象
//!
//! 定义聊天补全的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// 是否为可重试的瞬时错误（超时、连接失败、429、5xx）
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout | Self::NetworkError(_) => true,
            Self::ServiceError { status, .. } => *status == 429 || (500..600).contains(status),
            Self::InvalidResponse(_) => false,
        }
    }
}

/// 补全请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// 补全响应
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
}

/// Text Generator Port
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 执行一次聊天补全
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
