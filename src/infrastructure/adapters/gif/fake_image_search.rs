//! Fake Image Search - 用于测试的 GIF 检索能力

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{ImageHit, ImageSearchError, ImageSearchPort, ImageSearchRequest};

pub struct FakeImageSearch {
    /// None 表示始终失败
    urls: Option<Vec<String>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ImageSearchRequest>>,
}

impl FakeImageSearch {
    pub fn with_urls(urls: Vec<String>) -> Self {
        Self {
            urls: Some(urls),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn empty() -> Self {
        Self::with_urls(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            urls: None,
            ..Self::empty()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ImageSearchRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl ImageSearchPort for FakeImageSearch {
    async fn search(&self, request: ImageSearchRequest) -> Result<Vec<ImageHit>, ImageSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        match &self.urls {
            Some(urls) => Ok(urls.iter().cloned().map(|url| ImageHit { url }).collect()),
            None => Err(ImageSearchError::ServiceError("fake search unavailable".to_string())),
        }
    }
}
