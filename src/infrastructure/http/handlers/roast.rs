//! Roast Handler - 文字输入 → 疗愈回复

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::{RoastRequest, RoastResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 请求体解析失败时同样返回 `{ "error": ... }`
pub async fn roast(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RoastRequest>, JsonRejection>,
) -> Result<Json<RoastResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let result = state.pipeline.handle_text_request(req.text).await?;

    Ok(Json(result.into()))
}
