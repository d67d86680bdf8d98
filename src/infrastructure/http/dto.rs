//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::therapy::PipelineResult;

// ============================================================================
// Roast DTOs
// ============================================================================

/// `POST /roast` 请求体，缺少 text 时按空字符串处理
#[derive(Debug, Deserialize)]
pub struct RoastRequest {
    #[serde(default)]
    pub text: String,
}

/// `POST /roast` 响应体，语音合成失败时 audio 为 null
#[derive(Debug, Serialize)]
pub struct RoastResponse {
    pub roast: String,
    pub gif: String,
    pub audio: Option<String>,
}

impl From<PipelineResult> for RoastResponse {
    fn from(result: PipelineResult) -> Self {
        Self {
            roast: result.message,
            gif: result.image_url,
            audio: result.audio_base64,
        }
    }
}

// ============================================================================
// Transcribe DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcription: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let req: RoastRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.text, "");
    }

    #[test]
    fn test_absent_audio_serializes_as_null() {
        let response = RoastResponse::from(PipelineResult {
            message: "ok".to_string(),
            image_url: "https://g.example/a.gif".to_string(),
            audio_base64: None,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"roast": "ok", "gif": "https://g.example/a.gif", "audio": null})
        );
    }
}
