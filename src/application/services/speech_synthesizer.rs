//! Speech Synthesizer - 文字转语音
//!
//! 合成音频先落到唯一命名的临时文件，再读回做 Base64 编码。
//! 任何一步失败都只记录日志并返回 None。

use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine as _;

use crate::application::ports::{SynthesisRequest, TtsError, VoiceSynthesizerPort};

use super::scratch::ScratchFile;

/// 合成参数
#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    /// 固定音色
    pub voice_id: String,
    /// 合成模型
    pub model_id: String,
    /// 临时文件目录
    pub scratch_dir: PathBuf,
}

pub struct SpeechSynthesizer {
    synthesizer: Arc<dyn VoiceSynthesizerPort>,
    settings: SynthesisSettings,
}

impl SpeechSynthesizer {
    pub fn new(synthesizer: Arc<dyn VoiceSynthesizerPort>, settings: SynthesisSettings) -> Self {
        Self {
            synthesizer,
            settings,
        }
    }

    /// 合成语音，失败返回 None
    pub async fn synthesize(&self, message: &str) -> Option<String> {
        match self.try_synthesize(message).await {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::warn!(error = %e, "Speech synthesis failed, omitting audio");
                None
            }
        }
    }

    async fn try_synthesize(&self, message: &str) -> Result<String, TtsError> {
        // 先占用唯一文件名，合成失败或被取消时由 ScratchFile 负责删除
        let scratch = ScratchFile::create_in(&self.settings.scratch_dir, "speech_", ".mp3")
            .map_err(|e| TtsError::IoError(e.to_string()))?;

        let audio = self
            .synthesizer
            .synthesize(SynthesisRequest {
                text: message.to_string(),
                voice_id: self.settings.voice_id.clone(),
                model_id: self.settings.model_id.clone(),
            })
            .await?;

        scratch
            .write_all(&audio)
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;
        let bytes = scratch
            .read_all()
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;
        scratch.close();

        tracing::debug!(audio_size = bytes.len(), "Speech synthesized");

        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}
