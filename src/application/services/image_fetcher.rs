//! Image Fetcher - 检索 GIF
//!
//! 返回值总是一个 URL：检索失败或无结果时回落到固定 GIF，错误不会向上传播。

use std::sync::Arc;

use rand::seq::IndexedRandom;

use crate::application::ports::{ImageSearchPort, ImageSearchRequest};

/// 兜底 GIF
pub const DEFAULT_FALLBACK_GIF_URL: &str =
    "https://media.giphy.com/media/3oEjI6SIIHBdRxXI40/giphy.gif";

/// 检索参数
#[derive(Debug, Clone)]
pub struct ImageFetcherSettings {
    /// 候选数量上限
    pub limit: u32,
    /// 内容分级
    pub rating: String,
    /// 兜底 URL
    pub fallback_url: String,
}

impl Default for ImageFetcherSettings {
    fn default() -> Self {
        Self {
            limit: 10,
            rating: "g".to_string(),
            fallback_url: DEFAULT_FALLBACK_GIF_URL.to_string(),
        }
    }
}

pub struct ImageFetcher {
    search: Arc<dyn ImageSearchPort>,
    settings: ImageFetcherSettings,
}

impl ImageFetcher {
    pub fn new(search: Arc<dyn ImageSearchPort>, settings: ImageFetcherSettings) -> Self {
        Self { search, settings }
    }

    /// 检索并随机选取一个 GIF
    pub async fn fetch(&self, query: &str) -> String {
        let request = ImageSearchRequest {
            query: query.to_string(),
            limit: self.settings.limit,
            rating: self.settings.rating.clone(),
        };

        let hits = match self.search.search(request).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Image search failed, using fallback");
                return self.settings.fallback_url.clone();
            }
        };

        let chosen = hits.choose(&mut rand::rng()).map(|hit| hit.url.clone());
        match chosen {
            Some(url) => {
                tracing::debug!(query = %query, candidates = hits.len(), url = %url, "GIF selected");
                url
            }
            None => {
                tracing::info!(query = %query, "Image search returned no results, using fallback");
                self.settings.fallback_url.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FakeImageSearch;

    fn fetcher(search: Arc<FakeImageSearch>) -> ImageFetcher {
        ImageFetcher::new(search, ImageFetcherSettings::default())
    }

    #[tokio::test]
    async fn test_failure_returns_fallback() {
        let fetcher = fetcher(Arc::new(FakeImageSearch::failing()));
        assert_eq!(fetcher.fetch("comforting hug").await, DEFAULT_FALLBACK_GIF_URL);
    }

    #[tokio::test]
    async fn test_empty_results_return_fallback() {
        let fetcher = fetcher(Arc::new(FakeImageSearch::empty()));
        assert_eq!(fetcher.fetch("comforting hug").await, DEFAULT_FALLBACK_GIF_URL);
    }

    #[tokio::test]
    async fn test_result_is_one_of_candidates() {
        let urls: Vec<String> = (0..5)
            .map(|i| format!("https://media.example/gif/{}.gif", i))
            .collect();
        let fetcher = fetcher(Arc::new(FakeImageSearch::with_urls(urls.clone())));

        for _ in 0..50 {
            let url = fetcher.fetch("calm").await;
            assert!(urls.contains(&url));
        }
    }

    #[tokio::test]
    async fn test_single_candidate_is_always_chosen() {
        let fetcher = fetcher(Arc::new(FakeImageSearch::with_urls(vec![
            "https://media.example/only.gif".to_string(),
        ])));
        assert_eq!(fetcher.fetch("calm").await, "https://media.example/only.gif");
    }

    #[tokio::test]
    async fn test_request_uses_limit_and_rating() {
        let search = Arc::new(FakeImageSearch::empty());
        let fetcher = fetcher(search.clone());

        fetcher.fetch("sunrise").await;

        let request = search.last_request().unwrap();
        assert_eq!(request.query, "sunrise");
        assert_eq!(request.limit, 10);
        assert_eq!(request.rating, "g");
    }

    #[tokio::test]
    async fn test_custom_fallback_url() {
        let fetcher = ImageFetcher::new(
            Arc::new(FakeImageSearch::failing()),
            ImageFetcherSettings {
                fallback_url: "https://cdn.example/hug.gif".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(fetcher.fetch("x").await, "https://cdn.example/hug.gif");
    }
}
