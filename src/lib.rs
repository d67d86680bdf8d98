//! Solace - 情绪支持回复服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Therapy Context: 回复拆分、提示词
//!
//! 应用层 (application/):
//! - Ports: SpeechRecognizer, TextGenerator, VoiceSynthesizer, ImageSearch
//! - Services: Transcriber, ResponseGenerator, ImageFetcher, SpeechSynthesizer
//! - Commands: GenerateReply, TranscribeAudio
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: `/roast`、`/transcribe`
//! - Adapters: Groq, Whisper, ElevenLabs, Giphy 客户端及测试用 Fake

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
