//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;
use crate::application::ApplicationError;

/// 配置错误对外只暴露通用信息
const GENERIC_FAILURE: &str = "Text-to-speech service is unavailable";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 400 输入无效
    BadRequest(String),
    /// 429 重试耗尽后仍被上游限流
    RateLimited(String),
    /// 500 部署配置错误
    Misconfigured(String),
    /// 502 上游服务错误
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::RateLimited(msg) => {
                tracing::warn!(error = %msg, "Upstream rate limit exceeded");
                (StatusCode::TOO_MANY_REQUESTS, msg)
            }
            ApiError::Misconfigured(msg) => {
                tracing::error!(error = %msg, "Service misconfigured");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            ApiError::BadGateway(msg) => {
                tracing::error!(error = %msg, "Upstream provider error");
                (StatusCode::BAD_GATEWAY, msg)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        let message = e.to_string();
        match e {
            ApplicationError::InputError(msg) => ApiError::BadRequest(msg),
            ApplicationError::ConfigurationError(_) => ApiError::Misconfigured(message),
            ApplicationError::RateLimitExceeded { .. } => ApiError::RateLimited(message),
            ApplicationError::ProviderError(_) => ApiError::BadGateway(message),
        }
    }
}
