//! Fake Voice Synthesizer - 用于测试的语音合成能力
//!
//! 始终返回固定的音频字节，不实际调用 TTS 服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{SynthesisRequest, TtsError, VoiceSynthesizerPort};

pub struct FakeVoiceSynthesizer {
    /// None 表示始终失败
    audio: Option<Vec<u8>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<SynthesisRequest>>,
}

impl FakeVoiceSynthesizer {
    pub fn new(audio: Vec<u8>) -> Self {
        Self {
            audio: Some(audio),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            audio: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SynthesisRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl VoiceSynthesizerPort for FakeVoiceSynthesizer {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(text_len = request.text.len(), "FakeVoiceSynthesizer: returning fixed audio");
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        self.audio
            .clone()
            .ok_or_else(|| TtsError::ServiceError("fake synthesizer unavailable".to_string()))
    }
}
