//! 应用服务 - 流水线各阶段
//!
//! 每个服务包装一个外部能力端口：
//! - Transcriber: 录音 → 文字（失败即中断请求）
//! - ResponseGenerator: 文字 → 原始回复（失败即中断请求）
//! - ImageFetcher: 检索词 → GIF URL（失败回落到固定 URL）
//! - SpeechSynthesizer: 文字 → Base64 音频（失败返回 None）

mod image_fetcher;
mod response_generator;
mod scratch;
mod speech_synthesizer;
mod transcriber;

pub use image_fetcher::{ImageFetcher, ImageFetcherSettings, DEFAULT_FALLBACK_GIF_URL};
pub use response_generator::{GenerationSettings, ResponseGenerator};
pub use scratch::ScratchFile;
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisSettings};
pub use transcriber::{audio_suffix, Transcriber};
