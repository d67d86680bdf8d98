//! Voice Synthesizer Port - 语音合成能力抽象

use async_trait::async_trait;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
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

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色 ID
    pub voice_id: String,
    /// 合成模型 ID
    pub model_id: String,
}

/// Voice Synthesizer Port
///
/// 返回原始音频字节（MP3）
#[async_trait]
pub trait VoiceSynthesizerPort: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsError>;
}
