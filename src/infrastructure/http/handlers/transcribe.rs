//! Transcribe Handler - 录音 → 文字

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::TranscribeResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// multipart 中的录音字段名
const AUDIO_FIELD: &str = "audio";

const NO_AUDIO_FILE: &str = "No audio file";

/// 读取 `audio` 字段并转写
///
/// 非 multipart 请求与缺少 `audio` 字段一样按 "No audio file" 处理
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Request is not multipart");
        ApiError::BadRequest(NO_AUDIO_FILE.to_string())
    })?;

    let mut upload: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read audio file: {}", e)))?
            .to_vec();
        upload = Some((data, file_name));
        break;
    }

    let (audio, file_name) =
        upload.ok_or_else(|| ApiError::BadRequest(NO_AUDIO_FILE.to_string()))?;

    let transcription = state
        .pipeline
        .handle_audio_request(audio, file_name)
        .await?;

    Ok(Json(TranscribeResponse { transcription }))
}
