//! Fake Text Generator - 用于测试的文本生成能力
//!
//! 返回固定回复，可配置为始终失败或前 N 次失败

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{CompletionRequest, CompletionResponse, LlmError, TextGeneratorPort};

pub struct FakeTextGenerator {
    /// None 表示始终失败
    reply: Option<String>,
    fail_first: usize,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl FakeTextGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            fail_first: 0,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            ..Self::new("")
        }
    }

    /// 前 n 次调用返回瞬时错误
    pub fn fail_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl TextGeneratorPort for FakeTextGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        match &self.reply {
            Some(reply) if call >= self.fail_first => Ok(CompletionResponse {
                content: reply.clone(),
            }),
            _ => Err(LlmError::NetworkError("fake generator unavailable".to_string())),
        }
    }
}
