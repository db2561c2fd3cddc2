//! TTS Engine Port - TTS 合成引擎抽象
//!
//! 定义 TTS 合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    /// 上游限流（HTTP 429），可重试
    #[error("Rate limited by TTS service")]
    RateLimited,

    #[error("TTS service credential is not configured")]
    MissingCredential,

    #[error("Invalid TTS client configuration: {0}")]
    InvalidConfig(String),

    /// 音色 ID 无法作为单个 URL 路径段使用
    #[error("Invalid voice id: {0:?}")]
    InvalidVoiceId(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TtsError {
    /// 是否为限流错误
    pub fn is_throttled(&self) -> bool {
        matches!(self, TtsError::RateLimited)
    }
}

/// 单个片段的合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本（不超过上游字符限制）
    pub text: String,
    /// 上游服务的音色 ID
    pub voice_id: String,
}

/// 单个片段的合成结果
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// 上游请求 ID（用于追踪）
    pub request_id: Option<String>,
    /// 原始音频数据
    pub audio_data: Vec<u8>,
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成单个片段
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError>;

    /// 是否已配置访问凭证
    fn is_configured(&self) -> bool {
        true // 默认实现
    }
}
