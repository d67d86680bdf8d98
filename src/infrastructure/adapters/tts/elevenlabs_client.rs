//! ElevenLabs Client - 调用外部语音合成服务
//!
//! 实现 VoiceSynthesizerPort trait
//!
//! 外部 API:
//! POST {base_url}/text-to-speech/{voice_id}
//! Request: {"text": "...", "model_id": "..."}  (JSON)
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, TtsError, VoiceSynthesizerPort};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

/// ElevenLabs 语音合成客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn synthesis_url(&self, voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            voice_id
        )
    }
}

#[async_trait]
impl VoiceSynthesizerPort for ElevenLabsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        let url = self.synthesis_url(&request.voice_id);
        let body = ElevenLabsRequest {
            text: &request.text,
            model_id: &request.model_id,
        };

        tracing::debug!(
            url = %url,
            text_len = request.text.len(),
            model_id = %request.model_id,
            "Sending TTS request"
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse("Empty audio body".to_string()));
        }

        tracing::info!(audio_size = audio_data.len(), "TTS synthesis completed");

        Ok(audio_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io/v1");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_synthesis_url() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig {
            base_url: "http://tts.local/v1/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.synthesis_url("Xb7hH8MSUJpSbSDYk0k2"),
            "http://tts.local/v1/text-to-speech/Xb7hH8MSUJpSbSDYk0k2"
        );
    }
}
