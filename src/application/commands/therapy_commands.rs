//! Therapy Commands

/// 文字输入 → 完整疗愈回复
#[derive(Debug, Clone)]
pub struct GenerateReply {
    pub text: String,
}

/// 录音输入 → 转写文本
#[derive(Debug, Clone)]
pub struct TranscribeAudio {
    pub audio: Vec<u8>,
    /// 上传时的文件名，用于推断音频格式
    pub file_name: Option<String>,
}

/// 转写响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscribeAudioResponse {
    pub transcription: String,
}
