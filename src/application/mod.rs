//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 外部能力端口（语音识别、文本生成、语音合成、GIF 检索）
//! - services: 流水线各阶段
//! - commands: 命令及处理器
//! - pipeline: 按输入类型分派的入口
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod services;

pub use commands::{
    handlers::{GenerateReplyHandler, TranscribeAudioHandler},
    GenerateReply, TranscribeAudio, TranscribeAudioResponse,
};

pub use error::ApplicationError;

pub use pipeline::{PipelineOutcome, TherapyPipeline};

pub use ports::{
    // Image search
    ImageHit,
    ImageSearchError,
    ImageSearchPort,
    ImageSearchRequest,
    // Speech recognizer
    Recognition,
    SpeechRecognizerPort,
    SttError,
    // Text generator
    CompletionRequest,
    CompletionResponse,
    LlmError,
    TextGeneratorPort,
    // Voice synthesizer
    SynthesisRequest,
    TtsError,
    VoiceSynthesizerPort,
};
