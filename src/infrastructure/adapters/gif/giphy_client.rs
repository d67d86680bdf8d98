//! Giphy Client - GIF 检索服务
//!
//! 实现 ImageSearchPort trait
//!
//! 外部 API:
//! GET {base_url}/gifs/search?api_key=...&q=...&limit=10&rating=g
//! Response: {"data": [{"images": {"original": {"url": "..."}}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{ImageHit, ImageSearchError, ImageSearchPort, ImageSearchRequest};

#[derive(Debug, Deserialize)]
struct GiphySearchResponse {
    data: Vec<GiphyGif>,
}

#[derive(Debug, Deserialize)]
struct GiphyGif {
    #[serde(default)]
    images: Option<GiphyImages>,
}

#[derive(Debug, Deserialize)]
struct GiphyImages {
    #[serde(default)]
    original: Option<GiphyImage>,
}

#[derive(Debug, Deserialize)]
struct GiphyImage {
    #[serde(default)]
    url: Option<String>,
}

/// Giphy 客户端配置
#[derive(Debug, Clone)]
pub struct GiphyClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GiphyClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.giphy.com/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Giphy 检索客户端
pub struct GiphyClient {
    client: Client,
    config: GiphyClientConfig,
}

impl GiphyClient {
    pub fn new(config: GiphyClientConfig) -> Result<Self, ImageSearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImageSearchError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/gifs/search", self.config.base_url.trim_end_matches('/'))
    }
}

/// 提取原图 URL，跳过缺字段或空 URL 的条目
fn original_urls(body: GiphySearchResponse) -> Vec<ImageHit> {
    body.data
        .into_iter()
        .filter_map(|gif| gif.images?.original?.url)
        .filter(|url| !url.is_empty())
        .map(|url| ImageHit { url })
        .collect()
}

#[async_trait]
impl ImageSearchPort for GiphyClient {
    async fn search(&self, request: ImageSearchRequest) -> Result<Vec<ImageHit>, ImageSearchError> {
        let limit = request.limit.to_string();

        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("q", request.query.as_str()),
                ("limit", limit.as_str()),
                ("rating", request.rating.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageSearchError::Timeout
                } else {
                    ImageSearchError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImageSearchError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: GiphySearchResponse = response
            .json()
            .await
            .map_err(|e| ImageSearchError::InvalidResponse(e.to_string()))?;
        let hits = original_urls(parsed);

        tracing::debug!(query = %request.query, hits = hits.len(), "Giphy search completed");

        Ok(hits)
    }
}
