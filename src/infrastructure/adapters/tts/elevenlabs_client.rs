//! ElevenLabs TTS Client - 调用 ElevenLabs HTTP API
//!
//! 实现 TtsEnginePort trait
//!
//! 外部 TTS API:
//! POST {base_url}/v1/text-to-speech/{voice_id}?output_format=mp3_44100_128
//! Headers: xi-api-key, Accept: audio/mpeg
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}}  (JSON)
//! Response: audio/mpeg binary, request id in headers

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// 音色参数
#[derive(Debug, Clone, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// TTS 请求体 (JSON)
#[derive(Debug, Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API Key，缺失时所有合成请求返回 MissingCredential
    pub api_key: Option<String>,
    /// 模型 ID
    pub model_id: String,
    /// 输出格式
    pub output_format: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 音色参数
    pub voice_settings: VoiceSettings,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: None,
            model_id: "eleven_multilingual_v2".to_string(),
            output_format: "mp3_44100_128".to_string(),
            timeout_secs: 120,
            voice_settings: VoiceSettings::default(),
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs TTS 客户端
pub struct ElevenLabsClient {
    client: Client,
    base_url: Url,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建新的客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TtsError::InvalidConfig(format!("Invalid TTS base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TtsError::InvalidConfig(format!(
                "TTS base URL cannot be a base: {}",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// 获取合成 URL
    ///
    /// 音色 ID 作为单个路径段写入（`/`、`?`、`#`、`%` 均被转义），
    /// `output_format` 始终只有配置中的一个值
    fn synthesize_url(&self, voice_id: &str) -> Result<Url, TtsError> {
        if voice_id.is_empty() || voice_id == "." || voice_id == ".." {
            return Err(TtsError::InvalidVoiceId(voice_id.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TtsError::InvalidConfig("TTS base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v1", "text-to-speech", voice_id]);
        url.query_pairs_mut()
            .clear()
            .append_pair("output_format", &self.config.output_format);
        url.set_fragment(None);
        Ok(url)
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

#[async_trait]
impl TtsEnginePort for ElevenLabsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let api_key = self.api_key().ok_or(TtsError::MissingCredential)?;
        let url = self.synthesize_url(&request.voice_id)?;
        let body = ElevenLabsRequest {
            text: &request.text,
            model_id: &self.config.model_id,
            voice_settings: &self.config.voice_settings,
        };

        tracing::debug!(
            url = %url,
            text_len = request.text.chars().count(),
            voice_id = %request.voice_id,
            "Sending TTS request"
        );

        let response = self
            .client
            .post(url)
            .header("xi-api-key", api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(voice_id = %request.voice_id, "TTS service returned 429");
            return Err(TtsError::RateLimited);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let request_id = response
            .headers()
            .get("request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            // 成功响应原样保留，空片段不影响其余片段的拼接
            tracing::warn!(request_id = ?request_id, "TTS service returned empty audio body");
        }

        tracing::debug!(
            request_id = ?request_id,
            audio_size = audio_data.len(),
            "TTS request completed"
        );

        Ok(SynthesisResponse {
            request_id,
            audio_data,
        })
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
