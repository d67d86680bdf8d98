//! 提示词构建
//!
//! 固定的系统人设 + 嵌入用户原话的用户轮次

/// 系统提示词：人设、语气、以及 `GIF:` 结尾约定
pub const SYSTEM_PROMPT: &str = "You are a compassionate and empathetic AI therapist. \
Respond in a warm, understanding, and non-judgmental tone. \
Offer emotional support and practical advice. End with GIF: description.";

/// 一次补全请求的提示词对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// 构建提示词对，user_text 原样嵌入
pub fn build_prompt(user_text: &str) -> PromptPair {
    PromptPair {
        system: SYSTEM_PROMPT.to_string(),
        user: format!(
            "User says:\n{}\nOffer a therapeutic and emotionally supportive response. \
End with GIF: description.",
            user_text
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_embedded_verbatim() {
        let prompt = build_prompt("  I feel *overwhelmed*\ntoday ");
        assert!(prompt.user.starts_with("User says:\n  I feel *overwhelmed*\ntoday \n"));
        assert!(prompt.user.ends_with("End with GIF: description."));
    }

    #[test]
    fn test_system_prompt_requires_marker() {
        let prompt = build_prompt("hi");
        assert_eq!(prompt.system, SYSTEM_PROMPT);
        assert!(prompt.system.contains("GIF:"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("same"), build_prompt("same"));
    }
}
