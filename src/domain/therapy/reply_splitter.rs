//! 回复拆分器
//!
//! 以第一个 `GIF:` 标记为界，把模型输出拆成口播文本和 GIF 检索词。
//! 纯函数，无 I/O。

use super::value_objects::{GeneratedReply, SplitReply};

/// 分隔口播文本与 GIF 描述的哨兵标记
pub const GIF_MARKER: &str = "GIF:";

/// 回复中没有标记时使用的检索词
pub const FALLBACK_IMAGE_QUERY: &str = "mental health support";

/// 拆分生成的回复
///
/// - 找到标记：标记前后两段分别去除首尾空白
/// - 标记后为空：image_query 为空字符串（不走兜底）
/// - 找不到标记：message 原样保留，image_query 为兜底检索词
pub fn split_reply(reply: &GeneratedReply) -> SplitReply {
    match reply.raw_text.split_once(GIF_MARKER) {
        Some((message, query)) => SplitReply {
            message: message.trim().to_string(),
            image_query: query.trim().to_string(),
        },
        None => SplitReply {
            message: reply.raw_text.clone(),
            image_query: FALLBACK_IMAGE_QUERY.to_string(),
        },
    }
}
