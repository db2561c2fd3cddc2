//! Fake TTS Client - 本地运行用的 TTS 客户端
//!
//! 不调用外部服务，按文本内容生成确定性的字节

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone, Default)]
pub struct FakeTtsClientConfig {
    /// 模拟合成延迟（毫秒）
    pub latency_ms: u64,
}

/// Fake TTS Client
///
/// 返回 `[voice_id]text` 的 UTF-8 字节，便于核对拼接顺序
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(latency_ms = config.latency_ms, "FakeTtsClient initialized");
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        tracing::debug!(
            text_len = request.text.chars().count(),
            voice_id = %request.voice_id,
            "FakeTtsClient: returning synthetic audio"
        );

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        Ok(SynthesisResponse {
            request_id: Some(format!("fake-{}", uuid::Uuid::new_v4())),
            audio_data: format!("[{}]{}", request.voice_id, request.text).into_bytes(),
        })
    }
}
