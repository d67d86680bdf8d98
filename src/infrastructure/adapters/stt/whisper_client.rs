//! Whisper Client - OpenAI 兼容的转写服务
//!
//! 实现 SpeechRecognizerPort trait
//!
//! 外部 API:
//! POST {base_url}/audio/transcriptions
//! Request: multipart (file, model)
//! Response: {"text": "..."}

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::application::ports::{Recognition, SpeechRecognizerPort, SttError};

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Whisper 客户端配置
#[derive(Debug, Clone)]
pub struct WhisperClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for WhisperClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "whisper-large-v3".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Whisper 转写客户端
pub struct WhisperClient {
    client: Client,
    config: WhisperClientConfig,
}

impl WhisperClient {
    pub fn new(config: WhisperClientConfig) -> Result<Self, SttError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SttError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn transcriptions_url(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// 根据扩展名推断 MIME 类型
fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("wav") => "audio/wav",
        Some("mp3") | Some("mpga") | Some("mpeg") => "audio/mpeg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl SpeechRecognizerPort for WhisperClient {
    async fn recognize(&self, audio_path: &Path) -> Result<Recognition, SttError> {
        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(|e| SttError::IoError(e.to_string()))?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        tracing::debug!(
            url = %self.transcriptions_url(),
            audio_size = audio.len(),
            file_name = %file_name,
            "Sending transcription request"
        );

        let part = Part::bytes(audio)
            .file_name(file_name)
            .mime_str(mime_for(audio_path))
            .map_err(|e| SttError::InvalidResponse(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("model", self.config.model.clone());

        let response = self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SttError::Timeout
                } else if e.is_connect() {
                    SttError::NetworkError(format!("Cannot connect to STT service: {}", e))
                } else {
                    SttError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SttError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| SttError::InvalidResponse(format!("Failed to parse transcription: {}", e)))?;

        Ok(Recognition { text: parsed.text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = WhisperClientConfig::default();
        assert_eq!(config.model, "whisper-large-v3");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("/tmp/a.wav")), "audio/wav");
        assert_eq!(mime_for(Path::new("/tmp/a.webm")), "audio/webm");
        assert_eq!(mime_for(Path::new("/tmp/a.m4a")), "audio/mp4");
        assert_eq!(mime_for(Path::new("/tmp/a")), "application/octet-stream");
    }

    #[test]
    fn test_missing_text_parses_as_empty() {
        let parsed: TranscriptionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text, "");
    }

    #[tokio::test]
    async fn test_unreadable_path_is_io_error() {
        let client = WhisperClient::new(WhisperClientConfig::default()).unwrap();
        let result = client.recognize(Path::new("/nonexistent/audio.wav")).await;
        assert!(matches!(result, Err(SttError::IoError(_))));
    }
}
