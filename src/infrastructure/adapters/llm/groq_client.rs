//! Groq Client - OpenAI 兼容的聊天补全服务
//!
//! 实现 TextGeneratorPort trait
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [...], "temperature": 1.0, "max_tokens": 250}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{CompletionRequest, CompletionResponse, LlmError, TextGeneratorPort};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Groq 客户端配置
#[derive(Debug, Clone)]
pub struct GroqClientConfig {
    /// OpenAI 兼容 API 基础 URL
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GroqClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "llama3-70b-8192".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Groq 聊天补全客户端
pub struct GroqClient {
    client: Client,
    config: GroqClientConfig,
}

impl GroqClient {
    pub fn new(config: GroqClientConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

fn extract_content(body: ChatCompletionResponse) -> Result<String, LlmError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Completion has no content".to_string()))
}

#[async_trait]
impl TextGeneratorPort for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            prompt_len = request.user_prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else if e.is_connect() {
                    LlmError::NetworkError(format!("Cannot connect to LLM service: {}", e))
                } else {
                    LlmError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse completion: {}", e)))?;
        let content = extract_content(parsed)?;

        tracing::info!(reply_len = content.len(), "Chat completion finished");

        Ok(CompletionResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GroqClientConfig::default();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_completions_url_strips_trailing_slash() {
        let client = GroqClient::new(GroqClientConfig {
            base_url: "http://localhost:9000/v1/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_extract_first_choice() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Hi. GIF: wave"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(body).unwrap(), "Hi. GIF: wave");
    }

    #[test]
    fn test_extract_without_choices_is_invalid() {
        let body: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_content(body), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_transient_classification() {
        assert!(LlmError::Timeout.is_transient());
        assert!(LlmError::ServiceError { status: 429, message: String::new() }.is_transient());
        assert!(LlmError::ServiceError { status: 503, message: String::new() }.is_transient());
        assert!(!LlmError::ServiceError { status: 401, message: String::new() }.is_transient());
        assert!(!LlmError::InvalidResponse(String::new()).is_transient());
    }
}
