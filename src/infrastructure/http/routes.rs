//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                      GET   健康检查
//! - /api/voices                    GET   列出预置音色
//! - /api/text-to-speech            POST  合成语音
//! - /functions/v1/text-to-speech   POST  同上（兼容旧客户端路径）

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
        .route(
            "/functions/v1/text-to-speech",
            post(handlers::text_to_speech),
        )
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/voices", get(handlers::list_voices))
        .route("/text-to-speech", post(handlers::text_to_speech))
}
