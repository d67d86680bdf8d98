//! Therapy Pipeline - 流水线入口
//!
//! 持有两个命令处理器。文字输入走完整回复流水线，
//! 录音输入只做转写，是否串联由调用方决定。

use crate::application::commands::handlers::{GenerateReplyHandler, TranscribeAudioHandler};
use crate::application::commands::{GenerateReply, TranscribeAudio};
use crate::application::error::ApplicationError;
use crate::domain::therapy::{PipelineResult, UserInput};

/// 单次输入的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Reply(PipelineResult),
    Transcription(String),
}

pub struct TherapyPipeline {
    generate_reply: GenerateReplyHandler,
    transcribe_audio: TranscribeAudioHandler,
}

impl TherapyPipeline {
    pub fn new(generate_reply: GenerateReplyHandler, transcribe_audio: TranscribeAudioHandler) -> Self {
        Self {
            generate_reply,
            transcribe_audio,
        }
    }

    pub async fn handle_text_request(&self, text: String) -> Result<PipelineResult, ApplicationError> {
        self.generate_reply.handle(GenerateReply { text }).await
    }

    pub async fn handle_audio_request(
        &self,
        audio: Vec<u8>,
        file_name: Option<String>,
    ) -> Result<String, ApplicationError> {
        let response = self
            .transcribe_audio
            .handle(TranscribeAudio { audio, file_name })
            .await?;
        Ok(response.transcription)
    }

    /// 按输入类型分派
    pub async fn handle_input(&self, input: UserInput) -> Result<PipelineOutcome, ApplicationError> {
        match input {
            UserInput::Text(text) => self.handle_text_request(text).await.map(PipelineOutcome::Reply),
            UserInput::Audio(audio) => self
                .handle_audio_request(audio, None)
                .await
                .map(PipelineOutcome::Transcription),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{
        GenerationSettings, ImageFetcher, ImageFetcherSettings, ResponseGenerator,
        SpeechSynthesizer, SynthesisSettings, Transcriber,
    };
    use crate::infrastructure::adapters::{
        FakeImageSearch, FakeSpeechRecognizer, FakeTextGenerator, FakeVoiceSynthesizer,
    };
    use std::sync::Arc;
    use tempfile::tempdir;

    fn pipeline(
        dir: &std::path::Path,
        llm: Arc<FakeTextGenerator>,
        stt: Arc<FakeSpeechRecognizer>,
    ) -> TherapyPipeline {
        TherapyPipeline::new(
            GenerateReplyHandler::new(
                ResponseGenerator::new(llm, GenerationSettings::default()),
                ImageFetcher::new(
                    Arc::new(FakeImageSearch::with_urls(vec!["https://g.example/a.gif".to_string()])),
                    ImageFetcherSettings::default(),
                ),
                SpeechSynthesizer::new(
                    Arc::new(FakeVoiceSynthesizer::new(b"mp3".to_vec())),
                    SynthesisSettings {
                        voice_id: "v".to_string(),
                        model_id: "m".to_string(),
                        scratch_dir: dir.to_path_buf(),
                    },
                ),
            ),
            TranscribeAudioHandler::new(Transcriber::new(stt, dir)),
        )
    }

    #[tokio::test]
    async fn test_text_input_runs_reply_pipeline() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(FakeTextGenerator::new("Hold on. GIF: hug"));
        let stt = Arc::new(FakeSpeechRecognizer::new("unused"));
        let pipeline = pipeline(dir.path(), llm.clone(), stt.clone());

        let outcome = pipeline
            .handle_input(UserInput::Text("sad".to_string()))
            .await
            .unwrap();

        match outcome {
            PipelineOutcome::Reply(result) => {
                assert_eq!(result.message, "Hold on.");
                assert_eq!(result.image_url, "https://g.example/a.gif");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(stt.calls(), 0);
    }

    #[tokio::test]
    async fn test_audio_input_only_transcribes() {
        let dir = tempdir().unwrap();
        let llm = Arc::new(FakeTextGenerator::new("unused"));
        let stt = Arc::new(FakeSpeechRecognizer::new("I can't sleep"));
        let pipeline = pipeline(dir.path(), llm.clone(), stt.clone());

        let input = UserInput::Audio(b"RIFF".to_vec());
        assert!(input.is_audio());
        let outcome = pipeline.handle_input(input).await.unwrap();

        assert_eq!(outcome, PipelineOutcome::Transcription("I can't sleep".to_string()));
        assert_eq!(llm.calls(), 0);
    }
}
