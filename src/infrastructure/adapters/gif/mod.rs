//! GIF Adapter - 图片检索客户端实现

mod fake_image_search;
mod giphy_client;

pub use fake_image_search::FakeImageSearch;
pub use giphy_client::*;
