//! HTTP Routes
//!
//! API Endpoints:
//! - /roast          POST  文字 → 疗愈回复 + GIF + 语音
//! - /transcribe     POST  录音（multipart `audio` 字段）→ 文字
//! - /api/ping       GET   健康检查
//!
//! 页面与 favicon 由静态文件服务托管（见 server.rs）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/roast", post(handlers::roast))
        .route("/transcribe", post(handlers::transcribe))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/ping", get(handlers::ping))
}
