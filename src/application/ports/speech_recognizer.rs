//! Speech Recognizer Port - 语音识别能力抽象
//!
//! 识别能力从磁盘路径读取音频，调用方负责路径的生命周期

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 语音识别错误
#[derive(Debug, Error)]
pub enum SttError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 识别结果
#[derive(Debug, Clone)]
pub struct Recognition {
    pub text: String,
}

/// Speech Recognizer Port
#[async_trait]
pub trait SpeechRecognizerPort: Send + Sync {
    /// 识别指定路径的音频文件
    async fn recognize(&self, audio_path: &Path) -> Result<Recognition, SttError>;
}
