//! Therapy Context - 疗愈回复限界上下文
//!
//! 职责:
//! - 用户输入与回复的值对象
//! - 提示词构建（系统人设 + 用户轮次）
//! - 回复拆分（口播文本 / GIF 检索词）

mod prompt;
mod reply_splitter;
mod value_objects;

pub use prompt::{build_prompt, PromptPair, SYSTEM_PROMPT};
pub use reply_splitter::{split_reply, FALLBACK_IMAGE_QUERY, GIF_MARKER};
pub use value_objects::{GeneratedReply, PipelineResult, SplitReply, UserInput};
