//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::application::commands::handlers::SynthesisSettings;
use crate::application::retry::RetryPolicy;
use crate::domain::{ChunkConfig, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_VOICE_KEY};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 合成流程配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

fn default_max_body_bytes() -> usize {
    8 * 1024 * 1024 // 8 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    /// ElevenLabs HTTP API
    #[default]
    ElevenLabs,
    /// 本地假实现，不访问网络
    Fake,
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 服务类型
    #[serde(default)]
    pub provider: TtsProvider,

    /// API 基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// API Key，未设置时回退到 `ELEVENLABS_API_KEY` 环境变量
    #[serde(default)]
    pub api_key: Option<String>,

    /// 模型 ID
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// 输出格式
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 默认音色名称
    #[serde(default = "default_voice")]
    pub default_voice: String,

    #[serde(default = "default_stability")]
    pub stability: f32,

    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// Fake 实现的模拟延迟（毫秒）
    #[serde(default)]
    pub fake_latency_ms: u64,
}

fn default_tts_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

fn default_voice() -> String {
    DEFAULT_VOICE_KEY.to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            url: default_tts_url(),
            api_key: None,
            model_id: default_model_id(),
            output_format: default_output_format(),
            timeout_secs: default_tts_timeout(),
            default_voice: default_voice(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            fake_latency_ms: 0,
        }
    }
}

impl TtsConfig {
    /// 是否已配置 API Key
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

/// 合成流程配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 单块最大字符数
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// 每块最大尝试次数（含首次）
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 退避基数（毫秒）
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// 相邻片段请求间隔（毫秒）
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
}

fn default_max_chunk_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_pacing_delay_ms() -> u64 {
    500
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            pacing_delay_ms: default_pacing_delay_ms(),
        }
    }
}

impl SynthesisConfig {
    /// 转换为合成流程设置
    pub fn to_settings(&self, default_voice: &str) -> SynthesisSettings {
        SynthesisSettings {
            chunk: ChunkConfig::new(self.max_chunk_chars),
            retry: RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms)),
            pacing_delay: Duration::from_millis(self.pacing_delay_ms),
            default_voice: default_voice.to_string(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
