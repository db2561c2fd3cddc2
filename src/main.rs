//! Palace Voice - 长文本语音合成网关
//!
//! - Domain: 文本分块、音色表
//! - Application: 合成命令、音色查询、端口
//! - Infrastructure: http, adapters

use std::sync::Arc;

use palace_voice::application::{ListVoicesHandler, TtsEnginePort};
use palace_voice::config::{load_config, print_config, TtsProvider, CREDENTIAL_ENV_VAR};
use palace_voice::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, FakeTtsClient, FakeTtsClientConfig, VoiceSettings,
};
use palace_voice::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},palace_voice={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Palace Voice - 长文本语音合成网关");
    print_config(&config);

    // 创建 TTS 引擎
    let tts_engine: Arc<dyn TtsEnginePort> = match config.tts.provider {
        TtsProvider::ElevenLabs => {
            let tts_config = ElevenLabsClientConfig {
                base_url: config.tts.url.clone(),
                api_key: config.tts.api_key.clone(),
                model_id: config.tts.model_id.clone(),
                output_format: config.tts.output_format.clone(),
                timeout_secs: config.tts.timeout_secs,
                voice_settings: VoiceSettings {
                    stability: config.tts.stability,
                    similarity_boost: config.tts.similarity_boost,
                },
            };
            Arc::new(ElevenLabsClient::new(tts_config)?)
        }
        TtsProvider::Fake => Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            latency_ms: config.tts.fake_latency_ms,
        })),
    };

    if !tts_engine.is_configured() {
        tracing::warn!(
            "TTS credential missing (set PALACE_VOICE_TTS__API_KEY or {}); synthesis requests will fail",
            CREDENTIAL_ENV_VAR
        );
    }

    let settings = config.synthesis.to_settings(&config.tts.default_voice);
    if !ListVoicesHandler::new(settings.default_voice.clone()).default_is_known() {
        tracing::warn!(
            voice = %settings.default_voice,
            "Default voice is not in the voice table, it will be sent as a raw voice id"
        );
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let state = AppState::new(tts_engine, settings);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
