//! Therapy Command Handlers

use uuid::Uuid;

use crate::application::commands::{GenerateReply, TranscribeAudio, TranscribeAudioResponse};
use crate::application::error::ApplicationError;
use crate::application::services::{
    audio_suffix, ImageFetcher, ResponseGenerator, SpeechSynthesizer, Transcriber,
};
use crate::domain::therapy::{split_reply, PipelineResult};

// ============================================================================
// GenerateReply
// ============================================================================

/// GenerateReply Handler
///
/// 生成 → 拆分 → {GIF 检索, 语音合成}，后两步互不依赖，并发执行
pub struct GenerateReplyHandler {
    generator: ResponseGenerator,
    image_fetcher: ImageFetcher,
    speech: SpeechSynthesizer,
}

impl GenerateReplyHandler {
    pub fn new(
        generator: ResponseGenerator,
        image_fetcher: ImageFetcher,
        speech: SpeechSynthesizer,
    ) -> Self {
        Self {
            generator,
            image_fetcher,
            speech,
        }
    }

    pub async fn handle(&self, command: GenerateReply) -> Result<PipelineResult, ApplicationError> {
        let request_id = Uuid::new_v4();
        tracing::info!(
            request_id = %request_id,
            text_len = command.text.len(),
            "Generating reply"
        );

        let raw = self.generator.generate(&command.text).await?;
        let split = split_reply(&raw);

        let (image_url, audio_base64) = tokio::join!(
            self.image_fetcher.fetch(&split.image_query),
            self.speech.synthesize(&split.message),
        );

        tracing::info!(
            request_id = %request_id,
            message_len = split.message.len(),
            image_query = %split.image_query,
            has_audio = audio_base64.is_some(),
            "Reply generated"
        );

        Ok(PipelineResult {
            message: split.message,
            image_url,
            audio_base64,
        })
    }
}

// ============================================================================
// TranscribeAudio
// ============================================================================

/// TranscribeAudio Handler
///
/// 只做转写，不串联回复流水线
pub struct TranscribeAudioHandler {
    transcriber: Transcriber,
}

impl TranscribeAudioHandler {
    pub fn new(transcriber: Transcriber) -> Self {
        Self { transcriber }
    }

    pub async fn handle(
        &self,
        command: TranscribeAudio,
    ) -> Result<TranscribeAudioResponse, ApplicationError> {
        if command.audio.is_empty() {
            return Err(ApplicationError::validation("Audio file is empty"));
        }

        let suffix = audio_suffix(command.file_name.as_deref());
        let transcription = self.transcriber.transcribe(&command.audio, &suffix).await?;

        Ok(TranscribeAudioResponse { transcription })
    }
}
