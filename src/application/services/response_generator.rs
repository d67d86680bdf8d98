//! Response Generator - 生成疗愈回复
//!
//! 构建提示词对并调用文本生成能力，瞬时错误按指数退避有限重试。

use std::sync::Arc;
use std::time::Duration;

use crate::application::error::ApplicationError;
use crate::application::ports::{CompletionRequest, LlmError, TextGeneratorPort};
use crate::domain::therapy::{build_prompt, GeneratedReply};

/// 生成参数
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// 采样温度（偏高，措辞更多样）
    pub temperature: f32,
    /// 最大输出 token 数
    pub max_tokens: u32,
    /// 瞬时错误的最大重试次数，0 表示不重试
    pub max_retries: u32,
    /// 首次重试前的等待时间，之后每次翻倍
    pub retry_base_delay: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 250,
            max_retries: 0,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

/// 重试等待上限
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

pub struct ResponseGenerator {
    generator: Arc<dyn TextGeneratorPort>,
    settings: GenerationSettings,
}

impl ResponseGenerator {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, settings: GenerationSettings) -> Self {
        Self { generator, settings }
    }

    /// 生成原始回复（不做任何改写）
    pub async fn generate(&self, user_text: &str) -> Result<GeneratedReply, ApplicationError> {
        let prompt = build_prompt(user_text);
        let request = CompletionRequest {
            system_prompt: prompt.system,
            user_prompt: prompt.user,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let mut attempt = 0;
        loop {
            match self.generator.complete(request.clone()).await {
                Ok(response) => {
                    tracing::debug!(
                        attempt,
                        reply_len = response.content.len(),
                        "Completion received"
                    );
                    return Ok(GeneratedReply::new(response.content));
                }
                Err(e) if e.is_transient() && attempt < self.settings.max_retries => {
                    let delay = self.retry_delay(attempt);
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Completion failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(attempt, error = %e, "Completion failed");
                    return Err(Self::to_application_error(e));
                }
            }
        }
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.settings
            .retry_base_delay
            .saturating_mul(factor)
            .min(MAX_RETRY_DELAY)
    }

    fn to_application_error(e: LlmError) -> ApplicationError {
        ApplicationError::ExternalServiceError(format!("Text generation failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FakeTextGenerator;

    fn settings(max_retries: u32) -> GenerationSettings {
        GenerationSettings {
            max_retries,
            retry_base_delay: Duration::from_millis(1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_returns_raw_completion_unmodified() {
        let fake = Arc::new(FakeTextGenerator::new("  You are doing your best. GIF: hug \n"));
        let generator = ResponseGenerator::new(fake.clone(), settings(0));

        let reply = generator.generate("I feel overwhelmed today").await.unwrap();

        assert_eq!(reply.raw_text, "  You are doing your best. GIF: hug \n");
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_sampling() {
        let fake = Arc::new(FakeTextGenerator::new("ok"));
        let generator = ResponseGenerator::new(fake.clone(), settings(0));

        generator.generate("hello there").await.unwrap();

        let request = fake.last_request().unwrap();
        assert!(request.system_prompt.contains("GIF:"));
        assert!(request.user_prompt.contains("hello there"));
        assert_eq!(request.temperature, 1.0);
        assert_eq!(request.max_tokens, 250);
    }

    #[tokio::test]
    async fn test_failure_propagates_without_retry_by_default() {
        let fake = Arc::new(FakeTextGenerator::failing());
        let generator = ResponseGenerator::new(fake.clone(), settings(0));

        let result = generator.generate("hi").await;

        assert!(matches!(result, Err(ApplicationError::ExternalServiceError(_))));
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let fake = Arc::new(FakeTextGenerator::new("Better now.").fail_first(2));
        let generator = ResponseGenerator::new(fake.clone(), settings(3));

        let reply = generator.generate("hi").await.unwrap();

        assert_eq!(reply.raw_text, "Better now.");
        assert_eq!(fake.calls(), 3);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let fake = Arc::new(FakeTextGenerator::failing());
        let generator = ResponseGenerator::new(fake.clone(), settings(2));

        assert!(generator.generate("hi").await.is_err());
        assert_eq!(fake.calls(), 3);
    }

    #[test]
    fn test_retry_delay_doubles_and_caps() {
        let generator = ResponseGenerator::new(
            Arc::new(FakeTextGenerator::new("")),
            GenerationSettings {
                retry_base_delay: Duration::from_millis(500),
                ..Default::default()
            },
        );
        assert_eq!(generator.retry_delay(0), Duration::from_millis(500));
        assert_eq!(generator.retry_delay(1), Duration::from_millis(1000));
        assert_eq!(generator.retry_delay(2), Duration::from_millis(2000));
        assert_eq!(generator.retry_delay(10), MAX_RETRY_DELAY);
        assert_eq!(generator.retry_delay(40), MAX_RETRY_DELAY);
    }
}
