//! Transcriber - 录音转文字
//!
//! 录音先写入作用域临时文件，再交给识别能力读取；
//! 任何退出路径都会删除临时文件。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SpeechRecognizerPort;

use super::scratch::ScratchFile;

/// 识别能力支持的扩展名
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "m4a", "ogg", "webm", "flac", "mp4", "mpeg", "mpga",
];

/// 根据上传文件名推断临时文件后缀，无法识别时使用 `.wav`
pub fn audio_suffix(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .filter(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| ".wav".to_string())
}

pub struct Transcriber {
    recognizer: Arc<dyn SpeechRecognizerPort>,
    scratch_dir: PathBuf,
}

impl Transcriber {
    pub fn new(recognizer: Arc<dyn SpeechRecognizerPort>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            recognizer,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// 转写录音
    ///
    /// 识别能力返回空文本时原样返回空字符串
    pub async fn transcribe(&self, audio: &[u8], suffix: &str) -> Result<String, ApplicationError> {
        let scratch = ScratchFile::create_in(&self.scratch_dir, "audio_", suffix)
            .map_err(|e| ApplicationError::StorageError(format!("Failed to create temp audio file: {}", e)))?;

        scratch
            .write_all(audio)
            .await
            .map_err(|e| ApplicationError::StorageError(format!("Failed to write temp audio file: {}", e)))?;

        let recognition = self.recognizer.recognize(scratch.path()).await.map_err(|e| {
            tracing::error!(error = %e, "Speech recognition failed");
            ApplicationError::ExternalServiceError(format!("Transcription failed: {}", e))
        })?;

        scratch.close();

        tracing::info!(
            audio_size = audio.len(),
            text_len = recognition.text.len(),
            "Transcription completed"
        );

        Ok(recognition.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{Recognition, SttError};
    use crate::infrastructure::adapters::FakeSpeechRecognizer;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::tempdir;

    /// 记录收到的路径后永不返回
    #[derive(Default)]
    struct HangingRecognizer {
        seen_path: Mutex<Option<PathBuf>>,
    }

    #[async_trait]
    impl SpeechRecognizerPort for HangingRecognizer {
        async fn recognize(&self, audio_path: &Path) -> Result<Recognition, SttError> {
            *self.seen_path.lock().unwrap() = Some(audio_path.to_path_buf());
            std::future::pending().await
        }
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_audio_suffix() {
        assert_eq!(audio_suffix(Some("clip.webm")), ".webm");
        assert_eq!(audio_suffix(Some("CLIP.MP3")), ".mp3");
        assert_eq!(audio_suffix(Some("notes.txt")), ".wav");
        assert_eq!(audio_suffix(Some("blob")), ".wav");
        assert_eq!(audio_suffix(None), ".wav");
    }

    #[tokio::test]
    async fn test_transcribe_returns_text_and_cleans_up() {
        let dir = tempdir().unwrap();
        let recognizer = Arc::new(FakeSpeechRecognizer::new("I feel tired"));
        let transcriber = Transcriber::new(recognizer.clone(), dir.path());

        let text = transcriber.transcribe(b"RIFF fake", ".wav").await.unwrap();

        assert_eq!(text, "I feel tired");
        assert_eq!(recognizer.seen_audio(), vec![b"RIFF fake".to_vec()]);
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_transcribe_empty_text_is_not_an_error() {
        let dir = tempdir().unwrap();
        let transcriber = Transcriber::new(Arc::new(FakeSpeechRecognizer::new("")), dir.path());

        let text = transcriber.transcribe(b"RIFF silence", ".wav").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_transcribe_failure_propagates_and_cleans_up() {
        let dir = tempdir().unwrap();
        let recognizer = Arc::new(FakeSpeechRecognizer::failing());
        let transcriber = Transcriber::new(recognizer.clone(), dir.path());

        let result = transcriber.transcribe(b"garbage", ".wav").await;

        assert!(matches!(result, Err(ApplicationError::ExternalServiceError(_))));
        assert_eq!(recognizer.calls(), 1);
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_missing_scratch_dir_is_storage_error() {
        let dir = tempdir().unwrap();
        let recognizer = Arc::new(FakeSpeechRecognizer::new("unused"));
        let transcriber = Transcriber::new(recognizer.clone(), dir.path().join("missing"));

        let result = transcriber.transcribe(b"RIFF", ".wav").await;

        assert!(matches!(result, Err(ApplicationError::StorageError(_))));
        assert_eq!(recognizer.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_transcription_cleans_up() {
        let dir = tempdir().unwrap();
        let recognizer = Arc::new(HangingRecognizer::default());
        let transcriber = Transcriber::new(recognizer.clone(), dir.path());

        let result = tokio::time::timeout(
            Duration::from_millis(50),
            transcriber.transcribe(b"RIFF", ".wav"),
        )
        .await;

        assert!(result.is_err());
        let seen = recognizer.seen_path.lock().unwrap().clone().unwrap();
        assert!(seen.starts_with(dir.path()));
        assert!(!seen.exists());
        assert!(dir_is_empty(dir.path()));
    }
}
