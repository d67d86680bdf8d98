//! Application Ports - 出站端口定义
//!
//! 定义应用层与外部能力之间的抽象接口

mod image_search;
mod speech_recognizer;
mod text_generator;
mod voice_synthesizer;

pub use image_search::{ImageHit, ImageSearchError, ImageSearchPort, ImageSearchRequest};
pub use speech_recognizer::{Recognition, SpeechRecognizerPort, SttError};
pub use text_generator::{CompletionRequest, CompletionResponse, LlmError, TextGeneratorPort};
pub use voice_synthesizer::{SynthesisRequest, TtsError, VoiceSynthesizerPort};
