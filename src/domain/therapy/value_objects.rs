//! Therapy Context - Value Objects

use serde::Serialize;

/// 用户输入
///
/// 每个请求只携带一种输入：文字或录音
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Text(String),
    Audio(Vec<u8>),
}

impl UserInput {
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio(_))
    }
}

/// 语言模型返回的原始回复（未拆分）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    pub raw_text: String,
}

impl GeneratedReply {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }
}

/// 拆分后的回复
///
/// 不变量:
/// - raw_text 非空时 message 非空
/// - 无 GIF 标记时 image_query 为固定兜底检索词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReply {
    pub message: String,
    pub image_query: String,
}

/// 流水线最终产物
///
/// audio_base64 为 None 表示语音合成失败（尽力而为，不视为错误）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    pub message: String,
    pub image_url: String,
    pub audio_base64: Option<String>,
}
