//! HTTP Middleware
//!
//! 4xx/5xx 响应日志，附带耗时

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 错误响应日志中间件
///
/// 5xx 记为 error，4xx 记为 warn；具体错误信息在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "Request rejected"
        );
    }

    response
}
