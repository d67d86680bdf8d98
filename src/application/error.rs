//! 应用层错误定义
//!
//! 流水线必需阶段（转写、生成）的错误类型；
//! 尽力而为阶段（GIF、语音）在各自边界内消化，不会出现在这里。

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建外部服务错误
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalServiceError(message.into())
    }
}
