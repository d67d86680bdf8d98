//! TTS Adapter - 语音合成客户端实现

mod elevenlabs_client;
mod fake_voice_synthesizer;

pub use elevenlabs_client::*;
pub use fake_voice_synthesizer::FakeVoiceSynthesizer;
