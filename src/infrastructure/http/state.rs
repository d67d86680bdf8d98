//! Application State
//!
//! 请求之间只共享只读的能力句柄，不存在可变共享状态

use std::sync::Arc;

use crate::application::commands::handlers::{GenerateReplyHandler, TranscribeAudioHandler};
use crate::application::ports::{
    ImageSearchPort, SpeechRecognizerPort, TextGeneratorPort, VoiceSynthesizerPort,
};
use crate::application::services::{
    GenerationSettings, ImageFetcher, ImageFetcherSettings, ResponseGenerator, SpeechSynthesizer,
    SynthesisSettings, Transcriber,
};
use crate::application::TherapyPipeline;

/// 外部能力句柄
///
/// 启动时创建一次，测试中替换为 Fake 实现
#[derive(Clone)]
pub struct Capabilities {
    pub speech_recognizer: Arc<dyn SpeechRecognizerPort>,
    pub text_generator: Arc<dyn TextGeneratorPort>,
    pub voice_synthesizer: Arc<dyn VoiceSynthesizerPort>,
    pub image_search: Arc<dyn ImageSearchPort>,
}

/// 流水线参数
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub generation: GenerationSettings,
    pub image: ImageFetcherSettings,
    pub synthesis: SynthesisSettings,
}

/// 应用状态
pub struct AppState {
    pub pipeline: TherapyPipeline,
}

impl AppState {
    /// 创建应用状态
    pub fn new(capabilities: Capabilities, settings: PipelineSettings) -> Self {
        let scratch_dir = settings.synthesis.scratch_dir.clone();

        let generate_reply = GenerateReplyHandler::new(
            ResponseGenerator::new(capabilities.text_generator, settings.generation),
            ImageFetcher::new(capabilities.image_search, settings.image),
            SpeechSynthesizer::new(capabilities.voice_synthesizer, settings.synthesis),
        );
        let transcribe_audio = TranscribeAudioHandler::new(Transcriber::new(
            capabilities.speech_recognizer,
            scratch_dir,
        ));

        Self {
            pipeline: TherapyPipeline::new(generate_reply, transcribe_audio),
        }
    }
}
