//! Fake Speech Recognizer - 用于测试的语音识别能力
//!
//! 调用时读取临时文件内容并记录路径，便于断言清理行为

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{Recognition, SpeechRecognizerPort, SttError};

pub struct FakeSpeechRecognizer {
    /// None 表示始终失败
    text: Option<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(PathBuf, Vec<u8>)>>,
}

impl FakeSpeechRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.seen
            .lock()
            .map(|seen| seen.iter().map(|(p, _)| p.clone()).collect())
            .unwrap_or_default()
    }

    pub fn seen_audio(&self) -> Vec<Vec<u8>> {
        self.seen
            .lock()
            .map(|seen| seen.iter().map(|(_, a)| a.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechRecognizerPort for FakeSpeechRecognizer {
    async fn recognize(&self, audio_path: &Path) -> Result<Recognition, SttError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(|e| SttError::IoError(e.to_string()))?;
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((audio_path.to_path_buf(), audio));
        }

        match &self.text {
            Some(text) => Ok(Recognition { text: text.clone() }),
            None => Err(SttError::ServiceError("fake recognizer cannot decode audio".to_string())),
        }
    }
}
