//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, TtsProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 上游凭证的备用环境变量
pub const CREDENTIAL_ENV_VAR: &str = "ELEVENLABS_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `PALACE_VOICE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// `tts.api_key` 未设置时读取 `ELEVENLABS_API_KEY`
///
/// # 环境变量示例
/// - `PALACE_VOICE_SERVER__PORT=8080`
/// - `PALACE_VOICE_TTS__API_KEY=sk_...`
/// - `PALACE_VOICE_TTS__PROVIDER=fake`
/// - `PALACE_VOICE_SYNTHESIS__MAX_ATTEMPTS=5`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("tts.provider", "elevenlabs")?
        .set_default("tts.url", "https://api.elevenlabs.io")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("synthesis.max_chunk_chars", 9_500)?
        .set_default("synthesis.max_attempts", 3)?
        .set_default("synthesis.base_delay_ms", 1000)?
        .set_default("synthesis.pacing_delay_ms", 500)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: PALACE_VOICE_TTS__URL=http://localhost:9000
    builder = builder.add_source(
        Environment::with_prefix("PALACE_VOICE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_credential_fallback(&mut app_config, std::env::var(CREDENTIAL_ENV_VAR).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 未显式配置 API Key 时使用备用凭证
fn apply_credential_fallback(config: &mut AppConfig, fallback: Option<String>) {
    if !config.tts.has_api_key() {
        if let Some(key) = fallback.filter(|k| !k.trim().is_empty()) {
            config.tts.api_key = Some(key);
        }
    }
}

/// 验证配置有效性
///
/// 缺少 API Key 不在此处报错：服务照常启动，合成请求返回配置错误
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.provider == TtsProvider::ElevenLabs && config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.synthesis.max_chunk_chars == 0 {
        return Err(ConfigError::ValidationError(
            "max_chunk_chars must be greater than 0".to_string(),
        ));
    }

    if config.synthesis.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "max_attempts must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("TTS Provider: {:?}", config.tts.provider);
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS Model: {}", config.tts.model_id);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("TTS Credential Configured: {}", config.tts.has_api_key());
    tracing::info!("Default Voice: {}", config.tts.default_voice);
    tracing::info!("Max Chunk Chars: {}", config.synthesis.max_chunk_chars);
    tracing::info!(
        "Retry: {} attempts, base delay {}ms",
        config.synthesis.max_attempts,
        config.synthesis.base_delay_ms
    );
    tracing::info!("Pacing Delay: {}ms", config.synthesis.pacing_delay_ms);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
